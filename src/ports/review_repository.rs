//! Review repository port.

use async_trait::async_trait;

use crate::domain::foundation::{BookingId, DomainError, ReviewId};
use crate::domain::review::Review;

/// Repository port for review persistence.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Saves a new review.
    ///
    /// # Errors
    ///
    /// - `ReviewAlreadyExists` if the booking already has a review
    /// - `DatabaseError` on persistence failure
    async fn save(&self, review: &Review) -> Result<(), DomainError>;

    /// Updates an existing review's rating and comment.
    ///
    /// # Errors
    ///
    /// - `ReviewNotFound` if the review doesn't exist
    async fn update(&self, review: &Review) -> Result<(), DomainError>;

    /// Loads a review by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError>;

    /// Loads the review for a booking, if one exists.
    async fn find_by_booking(&self, booking_id: BookingId)
        -> Result<Option<Review>, DomainError>;

    /// Deletes a review.
    ///
    /// # Errors
    ///
    /// - `ReviewNotFound` if the review doesn't exist
    async fn delete(&self, id: ReviewId) -> Result<(), DomainError>;
}
