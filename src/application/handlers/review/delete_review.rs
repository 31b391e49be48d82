//! DeleteReviewHandler - Command handler for withdrawing a review.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{OwnerId, ReviewId};
use crate::domain::review::ReviewError;
use crate::ports::{RatingStore, ReviewRepository};

/// Command to delete a review.
#[derive(Debug, Clone)]
pub struct DeleteReviewCommand {
    pub review_id: ReviewId,
    pub owner_id: OwnerId,
}

/// Handler for review deletion. The sitter's aggregate rating is recomputed
/// afterwards; with no reviews left the sitter returns to unrated.
pub struct DeleteReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    ratings: Arc<dyn RatingStore>,
}

impl DeleteReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>, ratings: Arc<dyn RatingStore>) -> Self {
        Self { reviews, ratings }
    }

    pub async fn handle(&self, cmd: DeleteReviewCommand) -> Result<(), ReviewError> {
        let review = self
            .reviews
            .find_by_id(cmd.review_id)
            .await?
            .ok_or(ReviewError::not_found(cmd.review_id))?;
        review.authorize(cmd.owner_id)?;

        self.reviews.delete(review.id()).await?;
        self.ratings.recompute(review.sitter_id()).await?;

        info!(review_id = %review.id(), sitter_id = %review.sitter_id(), "review deleted");
        Ok(())
    }
}
