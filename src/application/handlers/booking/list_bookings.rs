//! ListBookingsHandler - Query handler for an actor's bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{Actor, BookingId};
use crate::ports::BookingReader;

/// Query for the acting participant's bookings.
#[derive(Debug, Clone)]
pub struct ListBookingsQuery {
    pub actor: Actor,
}

/// Handler for booking listings.
pub struct ListBookingsHandler {
    bookings: Arc<dyn BookingReader>,
}

impl ListBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingReader>) -> Self {
        Self { bookings }
    }

    /// Lists the actor's bookings, newest first.
    pub async fn handle(&self, query: ListBookingsQuery) -> Result<Vec<Booking>, BookingError> {
        Ok(self.bookings.list_for_actor(query.actor).await?)
    }

    /// Loads a single booking, visible only to its participants.
    pub async fn get(&self, actor: Actor, id: BookingId) -> Result<Booking, BookingError> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or(BookingError::not_found(id))?;

        let is_participant = match actor {
            Actor::Owner(owner_id) => booking.owner_id() == owner_id,
            Actor::Sitter(sitter_id) => booking.sitter_id() == sitter_id,
        };
        if !is_participant {
            return Err(BookingError::not_found(id));
        }
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTimelineStore;
    use crate::domain::booking::{BookingStatus, ServiceType};
    use crate::ports::TimelineStore;
    use crate::domain::foundation::{
        OwnerId, PetId, PriceQuote, SitterId, TimeRange, Timestamp,
    };

    fn range(start_hour: i64, end_hour: i64) -> TimeRange {
        TimeRange::new(
            Timestamp::from_unix_secs(start_hour * 3600),
            Timestamp::from_unix_secs(end_hour * 3600),
        )
        .unwrap()
    }

    async fn seed_booking(
        timeline: &Arc<InMemoryTimelineStore>,
        owner: OwnerId,
        sitter: SitterId,
        start_hour: i64,
    ) -> Booking {
        let booking = Booking::new(
            BookingId::new(),
            owner,
            sitter,
            vec![PetId::new()],
            ServiceType::PetWalking,
            range(start_hour, start_hour + 1),
            PriceQuote::zero(),
            BookingStatus::Requested,
        )
        .unwrap();
        let mut tx = timeline.begin(sitter).await.unwrap();
        tx.insert_booking(&booking).await.unwrap();
        tx.commit().await.unwrap();
        booking
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_actor() {
        let timeline = Arc::new(InMemoryTimelineStore::new());
        let owner = OwnerId::new();
        let sitter = SitterId::new();
        let mine = seed_booking(&timeline, owner, sitter, 8).await;
        seed_booking(&timeline, OwnerId::new(), sitter, 10).await;

        let handler = ListBookingsHandler::new(timeline.clone());

        let owned = handler
            .handle(ListBookingsQuery {
                actor: Actor::Owner(owner),
            })
            .await
            .unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id(), mine.id());

        let assigned = handler
            .handle(ListBookingsQuery {
                actor: Actor::Sitter(sitter),
            })
            .await
            .unwrap();
        assert_eq!(assigned.len(), 2);
    }

    #[tokio::test]
    async fn get_hides_bookings_from_non_participants() {
        let timeline = Arc::new(InMemoryTimelineStore::new());
        let owner = OwnerId::new();
        let sitter = SitterId::new();
        let booking = seed_booking(&timeline, owner, sitter, 8).await;

        let handler = ListBookingsHandler::new(timeline);
        assert!(handler.get(Actor::Owner(owner), booking.id()).await.is_ok());
        assert!(handler
            .get(Actor::Sitter(sitter), booking.id())
            .await
            .is_ok());

        let err = handler
            .get(Actor::Owner(OwnerId::new()), booking.id())
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::NotFound(_)));
    }
}
