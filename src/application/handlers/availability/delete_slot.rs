//! DeleteSlotHandler - Command handler for withdrawing an availability slot.

use std::sync::Arc;

use tracing::info;

use crate::domain::availability::AvailabilityError;
use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{SitterId, SlotId};
use crate::ports::TimelineStore;

/// Command to delete a slot.
#[derive(Debug, Clone)]
pub struct DeleteSlotCommand {
    pub slot_id: SlotId,
    pub sitter_id: SitterId,
}

/// Handler for slot deletion. A slot overlapping an active booking cannot be
/// withdrawn; the booking must be canceled or completed first.
pub struct DeleteSlotHandler {
    timeline: Arc<dyn TimelineStore>,
}

impl DeleteSlotHandler {
    pub fn new(timeline: Arc<dyn TimelineStore>) -> Self {
        Self { timeline }
    }

    pub async fn handle(&self, cmd: DeleteSlotCommand) -> Result<(), AvailabilityError> {
        let mut tx = self.timeline.begin(cmd.sitter_id).await?;

        let slot = tx
            .find_slot(cmd.slot_id)
            .await?
            .ok_or(AvailabilityError::not_found(cmd.slot_id))?;
        slot.authorize(cmd.sitter_id)?;

        let claimants = tx
            .find_overlapping_bookings(slot.range(), &BookingStatus::ACTIVE, None)
            .await?;
        if !claimants.is_empty() {
            return Err(AvailabilityError::SlotClaimed);
        }

        tx.delete_slot(slot.id()).await?;
        tx.commit().await?;

        info!(slot_id = %slot.id(), sitter_id = %cmd.sitter_id, "slot deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryTimelineStore;
    use crate::domain::availability::AvailabilitySlot;
    use crate::domain::booking::{Booking, ServiceType};
    use crate::domain::foundation::{
        BookingId, OwnerId, PetId, PriceQuote, TimeRange, Timestamp,
    };

    fn range(start_hour: i64, end_hour: i64) -> TimeRange {
        TimeRange::new(
            Timestamp::from_unix_secs(start_hour * 3600),
            Timestamp::from_unix_secs(end_hour * 3600),
        )
        .unwrap()
    }

    async fn seed_slot(
        timeline: &Arc<InMemoryTimelineStore>,
        sitter: SitterId,
    ) -> SlotId {
        let slot = AvailabilitySlot::new(SlotId::new(), sitter, range(8, 12));
        let id = slot.id();
        let mut tx = timeline.begin(sitter).await.unwrap();
        tx.insert_slot(&slot).await.unwrap();
        tx.commit().await.unwrap();
        id
    }

    #[tokio::test]
    async fn deletes_unclaimed_slot() {
        let timeline = Arc::new(InMemoryTimelineStore::new());
        let sitter = SitterId::new();
        let slot_id = seed_slot(&timeline, sitter).await;

        let handler = DeleteSlotHandler::new(timeline.clone());
        handler
            .handle(DeleteSlotCommand { slot_id, sitter_id: sitter })
            .await
            .unwrap();

        let mut tx = timeline.begin(sitter).await.unwrap();
        assert!(tx.find_slot(slot_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn claimed_slot_cannot_be_deleted() {
        let timeline = Arc::new(InMemoryTimelineStore::new());
        let sitter = SitterId::new();
        let slot_id = seed_slot(&timeline, sitter).await;

        let booking = Booking::new(
            BookingId::new(),
            OwnerId::new(),
            sitter,
            vec![PetId::new()],
            ServiceType::HouseSitting,
            range(9, 11),
            PriceQuote::zero(),
            BookingStatus::Requested,
        )
        .unwrap();
        let mut tx = timeline.begin(sitter).await.unwrap();
        tx.insert_booking(&booking).await.unwrap();
        tx.commit().await.unwrap();

        let handler = DeleteSlotHandler::new(timeline);
        let err = handler
            .handle(DeleteSlotCommand { slot_id, sitter_id: sitter })
            .await
            .unwrap_err();
        assert_eq!(err, AvailabilityError::SlotClaimed);
    }

    #[tokio::test]
    async fn slot_under_terminal_booking_can_be_deleted() {
        let timeline = Arc::new(InMemoryTimelineStore::new());
        let sitter = SitterId::new();
        let slot_id = seed_slot(&timeline, sitter).await;

        let booking = Booking::new(
            BookingId::new(),
            OwnerId::new(),
            sitter,
            vec![PetId::new()],
            ServiceType::HouseSitting,
            range(9, 11),
            PriceQuote::zero(),
            BookingStatus::Canceled,
        )
        .unwrap();
        let mut tx = timeline.begin(sitter).await.unwrap();
        tx.insert_booking(&booking).await.unwrap();
        tx.commit().await.unwrap();

        let handler = DeleteSlotHandler::new(timeline);
        assert!(handler
            .handle(DeleteSlotCommand { slot_id, sitter_id: sitter })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn unknown_slot_reports_not_found() {
        let handler = DeleteSlotHandler::new(Arc::new(InMemoryTimelineStore::new()));
        let err = handler
            .handle(DeleteSlotCommand {
                slot_id: SlotId::new(),
                sitter_id: SitterId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AvailabilityError::NotFound(_)));
    }
}
