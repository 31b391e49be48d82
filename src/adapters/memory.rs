//! In-memory adapters.
//!
//! Backing store for handler unit tests and the integration suite. Semantics
//! mirror the Postgres adapters: timeline transactions are serialized and
//! roll back unless committed, listings are sorted the same way, and the
//! review store enforces the one-review-per-booking key.
//!
//! The timeline lock here is store-wide rather than per sitter. That is
//! stricter than the advisory lock in Postgres, never looser, so tests cannot
//! pass on interleavings the real adapter would forbid.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::availability::{AvailabilitySlot, SlotStatus};
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    Actor, BookingId, DomainError, ErrorCode, OwnerId, PetId, ReviewId, SitterId, SlotId,
    TimeRange,
};
use crate::domain::review::Review;
use crate::ports::{
    AvailabilityFilter, AvailabilityReader, BookingReader, ProfileDirectory, RatingStore,
    ReviewRepository, TimelineStore, TimelineTx,
};

#[derive(Debug, Clone, Default)]
struct TimelineState {
    slots: HashMap<SlotId, AvailabilitySlot>,
    bookings: HashMap<BookingId, Booking>,
}

/// In-memory timeline store.
#[derive(Clone, Default)]
pub struct InMemoryTimelineStore {
    state: Arc<Mutex<TimelineState>>,
}

impl InMemoryTimelineStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimelineStore for InMemoryTimelineStore {
    async fn begin(&self, sitter_id: SitterId) -> Result<Box<dyn TimelineTx>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryTimelineTx {
            guard,
            working,
            sitter_id,
        }))
    }
}

/// Transaction over a working copy of the store. Commit writes the copy back;
/// dropping the transaction discards it.
struct InMemoryTimelineTx {
    guard: OwnedMutexGuard<TimelineState>,
    working: TimelineState,
    sitter_id: SitterId,
}

#[async_trait]
impl TimelineTx for InMemoryTimelineTx {
    async fn find_overlapping_slots(
        &mut self,
        range: TimeRange,
        statuses: &[SlotStatus],
    ) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let mut slots: Vec<AvailabilitySlot> = self
            .working
            .slots
            .values()
            .filter(|s| {
                s.sitter_id() == self.sitter_id
                    && statuses.contains(&s.status())
                    && s.range().overlaps(&range)
            })
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.range().start());
        Ok(slots)
    }

    async fn find_overlapping_bookings(
        &mut self,
        range: TimeRange,
        statuses: &[BookingStatus],
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>, DomainError> {
        let mut bookings: Vec<Booking> = self
            .working
            .bookings
            .values()
            .filter(|b| {
                b.sitter_id() == self.sitter_id
                    && statuses.contains(&b.status())
                    && b.range().overlaps(&range)
                    && exclude != Some(b.id())
            })
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.range().start());
        Ok(bookings)
    }

    async fn find_booking(&mut self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self
            .working
            .bookings
            .get(&id)
            .filter(|b| b.sitter_id() == self.sitter_id)
            .cloned())
    }

    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError> {
        self.working.bookings.insert(booking.id(), booking.clone());
        Ok(())
    }

    async fn update_booking_status(&mut self, booking: &Booking) -> Result<(), DomainError> {
        if !self.working.bookings.contains_key(&booking.id()) {
            return Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", booking.id()),
            ));
        }
        self.working.bookings.insert(booking.id(), booking.clone());
        Ok(())
    }

    async fn delete_booking(&mut self, id: BookingId) -> Result<(), DomainError> {
        self.working.bookings.remove(&id);
        Ok(())
    }

    async fn find_slot(&mut self, id: SlotId) -> Result<Option<AvailabilitySlot>, DomainError> {
        Ok(self
            .working
            .slots
            .get(&id)
            .filter(|s| s.sitter_id() == self.sitter_id)
            .cloned())
    }

    async fn insert_slot(&mut self, slot: &AvailabilitySlot) -> Result<(), DomainError> {
        self.working.slots.insert(slot.id(), slot.clone());
        Ok(())
    }

    async fn update_slot(&mut self, slot: &AvailabilitySlot) -> Result<(), DomainError> {
        if !self.working.slots.contains_key(&slot.id()) {
            return Err(DomainError::new(
                ErrorCode::SlotNotFound,
                format!("Availability slot not found: {}", slot.id()),
            ));
        }
        self.working.slots.insert(slot.id(), slot.clone());
        Ok(())
    }

    async fn delete_slot(&mut self, id: SlotId) -> Result<(), DomainError> {
        self.working.slots.remove(&id);
        Ok(())
    }

    async fn set_slot_status(
        &mut self,
        slot_ids: &[SlotId],
        status: SlotStatus,
    ) -> Result<(), DomainError> {
        for id in slot_ids {
            if let Some(slot) = self.working.slots.get_mut(id) {
                slot.set_status(status);
            }
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemoryTimelineTx {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}

#[async_trait]
impl AvailabilityReader for InMemoryTimelineStore {
    async fn list(&self, filter: AvailabilityFilter) -> Result<Vec<AvailabilitySlot>, DomainError> {
        let state = self.state.lock().await;
        let mut slots: Vec<AvailabilitySlot> = state
            .slots
            .values()
            .filter(|s| s.sitter_id() == filter.sitter_id())
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.range().start());
        Ok(slots)
    }
}

#[async_trait]
impl BookingReader for InMemoryTimelineStore {
    async fn list_for_actor(&self, actor: Actor) -> Result<Vec<Booking>, DomainError> {
        let state = self.state.lock().await;
        let mut bookings: Vec<Booking> = state
            .bookings
            .values()
            .filter(|b| match actor {
                Actor::Owner(owner_id) => b.owner_id() == owner_id,
                Actor::Sitter(sitter_id) => b.sitter_id() == sitter_id,
            })
            .cloned()
            .collect();
        bookings.sort_by_key(|b| std::cmp::Reverse(b.created_at()));
        Ok(bookings)
    }

    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.bookings.get(&id).cloned())
    }
}

/// In-memory pet-to-owner directory.
#[derive(Default)]
pub struct InMemoryProfileDirectory {
    owners: StdMutex<HashMap<PetId, OwnerId>>,
}

impl InMemoryProfileDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pet as belonging to an owner.
    pub fn register(&self, pet_id: PetId, owner_id: OwnerId) {
        self.owners.lock().unwrap().insert(pet_id, owner_id);
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryProfileDirectory {
    async fn pet_owner(&self, pet_id: PetId) -> Result<Option<OwnerId>, DomainError> {
        Ok(self.owners.lock().unwrap().get(&pet_id).copied())
    }
}

#[derive(Debug, Default)]
struct ReviewState {
    reviews: HashMap<ReviewId, Review>,
    ratings: HashMap<SitterId, Decimal>,
}

/// In-memory review repository doubling as the rating store.
#[derive(Default)]
pub struct InMemoryReviewStore {
    state: StdMutex<ReviewState>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sitter's current aggregate rating, `None` when unrated.
    pub fn rating_of(&self, sitter_id: SitterId) -> Option<Decimal> {
        self.state.lock().unwrap().ratings.get(&sitter_id).copied()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewStore {
    async fn save(&self, review: &Review) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state
            .reviews
            .values()
            .any(|r| r.booking_id() == review.booking_id())
        {
            return Err(DomainError::new(
                ErrorCode::ReviewAlreadyExists,
                format!("Booking {} already has a review", review.booking_id()),
            ));
        }
        state.reviews.insert(review.id(), review.clone());
        Ok(())
    }

    async fn update(&self, review: &Review) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if !state.reviews.contains_key(&review.id()) {
            return Err(DomainError::new(
                ErrorCode::ReviewNotFound,
                format!("Review not found: {}", review.id()),
            ));
        }
        state.reviews.insert(review.id(), review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, DomainError> {
        Ok(self.state.lock().unwrap().reviews.get(&id).cloned())
    }

    async fn find_by_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<Review>, DomainError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .reviews
            .values()
            .find(|r| r.booking_id() == booking_id)
            .cloned())
    }

    async fn delete(&self, id: ReviewId) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.reviews.remove(&id).is_none() {
            return Err(DomainError::new(
                ErrorCode::ReviewNotFound,
                format!("Review not found: {}", id),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RatingStore for InMemoryReviewStore {
    async fn recompute(&self, sitter_id: SitterId) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let ratings: Vec<i16> = state
            .reviews
            .values()
            .filter(|r| r.sitter_id() == sitter_id)
            .map(|r| r.rating().value())
            .collect();
        if ratings.is_empty() {
            state.ratings.remove(&sitter_id);
        } else {
            let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
            let average = Decimal::from(sum) / Decimal::from(ratings.len() as i64);
            state.ratings.insert(sitter_id, average.round_dp(2));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ReviewRating, Timestamp};

    fn range(start_hour: i64, end_hour: i64) -> TimeRange {
        TimeRange::new(
            Timestamp::from_unix_secs(start_hour * 3600),
            Timestamp::from_unix_secs(end_hour * 3600),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn uncommitted_transaction_rolls_back() {
        let store = InMemoryTimelineStore::new();
        let sitter = SitterId::new();
        let slot = AvailabilitySlot::new(SlotId::new(), sitter, range(8, 12));

        {
            let mut tx = store.begin(sitter).await.unwrap();
            tx.insert_slot(&slot).await.unwrap();
            // dropped without commit
        }

        let mut tx = store.begin(sitter).await.unwrap();
        assert!(tx.find_slot(slot.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn committed_transaction_persists() {
        let store = InMemoryTimelineStore::new();
        let sitter = SitterId::new();
        let slot = AvailabilitySlot::new(SlotId::new(), sitter, range(8, 12));

        let mut tx = store.begin(sitter).await.unwrap();
        tx.insert_slot(&slot).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin(sitter).await.unwrap();
        assert!(tx.find_slot(slot.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn transaction_is_scoped_to_its_sitter() {
        let store = InMemoryTimelineStore::new();
        let sitter = SitterId::new();
        let slot = AvailabilitySlot::new(SlotId::new(), sitter, range(8, 12));

        let mut tx = store.begin(sitter).await.unwrap();
        tx.insert_slot(&slot).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin(SitterId::new()).await.unwrap();
        assert!(tx.find_slot(slot.id()).await.unwrap().is_none());
        assert!(tx
            .find_overlapping_slots(range(0, 24), SlotStatus::ALL)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn recompute_averages_all_reviews_for_the_sitter() {
        let store = InMemoryReviewStore::new();
        let sitter = SitterId::new();
        for rating in [ReviewRating::Five, ReviewRating::Two] {
            let review = Review::new(
                ReviewId::new(),
                BookingId::new(),
                OwnerId::new(),
                sitter,
                rating,
                String::new(),
            );
            store.save(&review).await.unwrap();
        }
        store.recompute(sitter).await.unwrap();
        assert_eq!(store.rating_of(sitter), Some(Decimal::new(35, 1)));
    }
}
