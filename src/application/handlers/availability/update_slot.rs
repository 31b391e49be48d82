//! UpdateSlotHandler - Command handler for editing an availability slot.

use std::sync::Arc;

use tracing::info;

use crate::domain::availability::{AvailabilityError, AvailabilitySlot, SlotStatus};
use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{SitterId, SlotId, TimeRange, Timestamp};
use crate::ports::TimelineStore;

/// Command to reschedule a slot or change its status.
#[derive(Debug, Clone)]
pub struct UpdateSlotCommand {
    pub slot_id: SlotId,
    pub sitter_id: SitterId,
    pub start: Timestamp,
    pub end: Timestamp,
    pub status: SlotStatus,
}

/// Handler for slot updates.
///
/// A slot overlapping an active booking is claimed by that booking and cannot
/// be edited; the check covers both the current range and the requested one,
/// so a slot can neither be moved away from under a booking nor onto one.
pub struct UpdateSlotHandler {
    timeline: Arc<dyn TimelineStore>,
}

impl UpdateSlotHandler {
    pub fn new(timeline: Arc<dyn TimelineStore>) -> Self {
        Self { timeline }
    }

    pub async fn handle(&self, cmd: UpdateSlotCommand) -> Result<AvailabilitySlot, AvailabilityError> {
        // 1. Validate the new range
        let range = TimeRange::new(cmd.start, cmd.end)?;

        let mut tx = self.timeline.begin(cmd.sitter_id).await?;

        // 2. Load and authorize
        let mut slot = tx
            .find_slot(cmd.slot_id)
            .await?
            .ok_or(AvailabilityError::not_found(cmd.slot_id))?;
        slot.authorize(cmd.sitter_id)?;

        // 3. Neither the old nor the new range may overlap an active booking
        for window in [slot.range(), range] {
            let claimants = tx
                .find_overlapping_bookings(window, &BookingStatus::ACTIVE, None)
                .await?;
            if !claimants.is_empty() {
                return Err(AvailabilityError::SlotClaimed);
            }
        }

        // 4. The new range may not overlap another slot
        let overlapping = tx.find_overlapping_slots(range, SlotStatus::ALL).await?;
        if overlapping.iter().any(|other| other.id() != slot.id()) {
            return Err(AvailabilityError::SlotOverlap);
        }

        // 5. Apply and persist
        slot.reschedule(range);
        slot.set_status(cmd.status);
        tx.update_slot(&slot).await?;
        tx.commit().await?;

        info!(slot_id = %slot.id(), status = %slot.status(), "slot updated");
        Ok(slot)
    }
}
