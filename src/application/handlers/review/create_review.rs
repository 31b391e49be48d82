//! CreateReviewHandler - Command handler for reviewing a completed booking.

use std::sync::Arc;

use tracing::info;

use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{BookingId, OwnerId, ReviewId, ReviewRating};
use crate::domain::review::{Review, ReviewError};
use crate::ports::{BookingReader, RatingStore, ReviewRepository};

/// Command to create a review.
#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub booking_id: BookingId,
    pub owner_id: OwnerId,
    pub rating: i16,
    pub comment: String,
}

/// Handler for review creation. Only the booking's owner may review, only
/// once the booking is completed, and only once per booking. Every successful
/// write recomputes the sitter's aggregate rating.
pub struct CreateReviewHandler {
    reviews: Arc<dyn ReviewRepository>,
    bookings: Arc<dyn BookingReader>,
    ratings: Arc<dyn RatingStore>,
}

impl CreateReviewHandler {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        bookings: Arc<dyn BookingReader>,
        ratings: Arc<dyn RatingStore>,
    ) -> Self {
        Self {
            reviews,
            bookings,
            ratings,
        }
    }

    pub async fn handle(&self, cmd: CreateReviewCommand) -> Result<Review, ReviewError> {
        // 1. Rating must be 1..=5
        let rating = ReviewRating::try_from_i16(cmd.rating)?;

        // 2. The booking must exist, be completed, and belong to the author
        let booking = self
            .bookings
            .find_by_id(cmd.booking_id)
            .await?
            .ok_or(ReviewError::BookingNotFound(cmd.booking_id))?;
        if booking.status() != BookingStatus::Completed {
            return Err(ReviewError::BookingNotCompleted);
        }
        if booking.owner_id() != cmd.owner_id {
            return Err(ReviewError::Forbidden);
        }

        // 3. One review per booking
        if self.reviews.find_by_booking(cmd.booking_id).await?.is_some() {
            return Err(ReviewError::already_exists(cmd.booking_id));
        }

        // 4. Persist and refresh the sitter's aggregate rating
        let review = Review::new(
            ReviewId::new(),
            cmd.booking_id,
            cmd.owner_id,
            booking.sitter_id(),
            rating,
            cmd.comment,
        );
        self.reviews.save(&review).await?;
        self.ratings.recompute(review.sitter_id()).await?;

        info!(
            review_id = %review.id(),
            booking_id = %review.booking_id(),
            rating = rating.value(),
            "review created"
        );
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryReviewStore, InMemoryTimelineStore};
    use crate::domain::booking::{Booking, ServiceType};
    use crate::domain::foundation::{PetId, PriceQuote, SitterId, TimeRange, Timestamp};
    use crate::ports::TimelineStore;
    use rust_decimal::Decimal;

    fn range() -> TimeRange {
        TimeRange::new(
            Timestamp::from_unix_secs(0),
            Timestamp::from_unix_secs(3600),
        )
        .unwrap()
    }

    struct Fixture {
        reviews: Arc<InMemoryReviewStore>,
        handler: CreateReviewHandler,
        owner: OwnerId,
        sitter: SitterId,
        booking: Booking,
    }

    async fn fixture(status: BookingStatus) -> Fixture {
        let timeline = Arc::new(InMemoryTimelineStore::new());
        let reviews = Arc::new(InMemoryReviewStore::new());
        let owner = OwnerId::new();
        let sitter = SitterId::new();

        let booking = Booking::new(
            BookingId::new(),
            owner,
            sitter,
            vec![PetId::new()],
            ServiceType::HouseSitting,
            range(),
            PriceQuote::zero(),
            status,
        )
        .unwrap();
        let mut tx = timeline.begin(sitter).await.unwrap();
        tx.insert_booking(&booking).await.unwrap();
        tx.commit().await.unwrap();

        let handler = CreateReviewHandler::new(reviews.clone(), timeline, reviews.clone());
        Fixture {
            reviews,
            handler,
            owner,
            sitter,
            booking,
        }
    }

    fn cmd(fx: &Fixture, rating: i16) -> CreateReviewCommand {
        CreateReviewCommand {
            booking_id: fx.booking.id(),
            owner_id: fx.owner,
            rating,
            comment: "Took great care of our cat".to_string(),
        }
    }

    #[tokio::test]
    async fn reviews_completed_booking_and_recomputes_rating() {
        let fx = fixture(BookingStatus::Completed).await;
        let review = fx.handler.handle(cmd(&fx, 4)).await.unwrap();
        assert_eq!(review.rating().value(), 4);
        assert_eq!(fx.reviews.rating_of(fx.sitter), Some(Decimal::from(4)));
    }

    #[tokio::test]
    async fn rating_out_of_range_is_rejected() {
        let fx = fixture(BookingStatus::Completed).await;
        let err = fx.handler.handle(cmd(&fx, 6)).await.unwrap_err();
        assert!(matches!(err, ReviewError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn incomplete_booking_cannot_be_reviewed() {
        for status in [BookingStatus::Requested, BookingStatus::Confirmed, BookingStatus::Canceled]
        {
            let fx = fixture(status).await;
            let err = fx.handler.handle(cmd(&fx, 5)).await.unwrap_err();
            assert_eq!(err, ReviewError::BookingNotCompleted);
        }
    }

    #[tokio::test]
    async fn only_the_booking_owner_may_review() {
        let fx = fixture(BookingStatus::Completed).await;
        let mut command = cmd(&fx, 5);
        command.owner_id = OwnerId::new();
        let err = fx.handler.handle(command).await.unwrap_err();
        assert_eq!(err, ReviewError::Forbidden);
    }

    #[tokio::test]
    async fn second_review_for_same_booking_is_rejected() {
        let fx = fixture(BookingStatus::Completed).await;
        fx.handler.handle(cmd(&fx, 5)).await.unwrap();
        let err = fx.handler.handle(cmd(&fx, 3)).await.unwrap_err();
        assert!(matches!(err, ReviewError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn unknown_booking_reports_booking_not_found() {
        let fx = fixture(BookingStatus::Completed).await;
        let mut command = cmd(&fx, 5);
        command.booking_id = BookingId::new();
        let err = fx.handler.handle(command).await.unwrap_err();
        assert!(matches!(err, ReviewError::BookingNotFound(_)));
    }
}
