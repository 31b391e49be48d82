//! UpdateReviewHandler - Command handler for revising a review.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{OwnerId, ReviewId, ReviewRating};
use crate::domain::review::{Review, ReviewError};
use crate::ports::{RatingStore, ReviewRepository};

/// Command to revise a review's rating and comment.
#[derive(Debug, Clone)]
pub struct UpdateReviewCommand {
    pub review_id: ReviewId,
    pub owner_id: OwnerId,
    pub rating: i16,
    pub comment: String,
}

/// Handler for review updates. Only the authoring owner may revise.
pub struct UpdateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    ratings: Arc<dyn RatingStore>,
}

impl UpdateReviewHandler {
    pub fn new(reviews: Arc<dyn ReviewRepository>, ratings: Arc<dyn RatingStore>) -> Self {
        Self { reviews, ratings }
    }

    pub async fn handle(&self, cmd: UpdateReviewCommand) -> Result<Review, ReviewError> {
        let rating = ReviewRating::try_from_i16(cmd.rating)?;

        let mut review = self
            .reviews
            .find_by_id(cmd.review_id)
            .await?
            .ok_or(ReviewError::not_found(cmd.review_id))?;
        review.authorize(cmd.owner_id)?;

        review.revise(rating, cmd.comment);
        self.reviews.update(&review).await?;
        self.ratings.recompute(review.sitter_id()).await?;

        info!(review_id = %review.id(), rating = rating.value(), "review updated");
        Ok(review)
    }
}
