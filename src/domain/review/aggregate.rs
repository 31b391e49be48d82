//! Review aggregate entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, OwnerId, ReviewId, ReviewRating, SitterId, Timestamp,
};

/// An owner's review of a sitter, tied to one completed booking.
///
/// # Invariants
///
/// - exactly one review per booking (enforced by the repository's unique key)
/// - `rating` in [1, 5] (guaranteed by [`ReviewRating`])
/// - mutated only by the authoring owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    booking_id: BookingId,
    owner_id: OwnerId,
    sitter_id: SitterId,
    rating: ReviewRating,
    comment: String,
    created_at: Timestamp,
}

impl Review {
    /// Creates a new review.
    pub fn new(
        id: ReviewId,
        booking_id: BookingId,
        owner_id: OwnerId,
        sitter_id: SitterId,
        rating: ReviewRating,
        comment: String,
    ) -> Self {
        Self {
            id,
            booking_id,
            owner_id,
            sitter_id,
            rating,
            comment,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a review from persistence.
    pub fn reconstitute(
        id: ReviewId,
        booking_id: BookingId,
        owner_id: OwnerId,
        sitter_id: SitterId,
        rating: ReviewRating,
        comment: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            booking_id,
            owner_id,
            sitter_id,
            rating,
            comment,
            created_at,
        }
    }

    /// Returns the review ID.
    pub fn id(&self) -> ReviewId {
        self.id
    }

    /// Returns the reviewed booking's ID.
    pub fn booking_id(&self) -> BookingId {
        self.booking_id
    }

    /// Returns the authoring owner's ID.
    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the reviewed sitter's ID.
    pub fn sitter_id(&self) -> SitterId {
        self.sitter_id
    }

    /// Returns the star rating.
    pub fn rating(&self) -> ReviewRating {
        self.rating
    }

    /// Returns the review comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns when the review was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Validates that the owner authored this review.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the owner did not author the review
    pub fn authorize(&self, owner_id: OwnerId) -> Result<(), DomainError> {
        if self.owner_id == owner_id {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Owner did not author this review",
            ))
        }
    }

    /// Replaces the rating and comment.
    pub fn revise(&mut self, rating: ReviewRating, comment: String) {
        self.rating = rating;
        self.comment = comment;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_review(owner: OwnerId) -> Review {
        Review::new(
            ReviewId::new(),
            BookingId::new(),
            owner,
            SitterId::new(),
            ReviewRating::Four,
            "Great with our dog".to_string(),
        )
    }

    #[test]
    fn author_is_authorized() {
        let owner = OwnerId::new();
        assert!(test_review(owner).authorize(owner).is_ok());
    }

    #[test]
    fn non_author_is_forbidden() {
        let review = test_review(OwnerId::new());
        assert!(review.authorize(OwnerId::new()).is_err());
    }

    #[test]
    fn revise_replaces_rating_and_comment() {
        let mut review = test_review(OwnerId::new());
        review.revise(ReviewRating::Two, "Second visit went poorly".to_string());
        assert_eq!(review.rating(), ReviewRating::Two);
        assert_eq!(review.comment(), "Second visit went poorly");
    }
}
