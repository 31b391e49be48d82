//! CreateSlotHandler - Command handler for declaring availability.

use std::sync::Arc;

use tracing::info;

use crate::domain::availability::{AvailabilityError, AvailabilitySlot, SlotStatus};
use crate::domain::foundation::{SitterId, SlotId, TimeRange, Timestamp};
use crate::ports::TimelineStore;

/// Command to declare a new availability slot.
#[derive(Debug, Clone)]
pub struct CreateSlotCommand {
    pub sitter_id: SitterId,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Handler for slot creation. New slots always start `Open`; blocking time is
/// an update on an existing slot.
pub struct CreateSlotHandler {
    timeline: Arc<dyn TimelineStore>,
}

impl CreateSlotHandler {
    pub fn new(timeline: Arc<dyn TimelineStore>) -> Self {
        Self { timeline }
    }

    pub async fn handle(&self, cmd: CreateSlotCommand) -> Result<AvailabilitySlot, AvailabilityError> {
        // 1. Validate the range
        let range = TimeRange::new(cmd.start, cmd.end)?;

        let mut tx = self.timeline.begin(cmd.sitter_id).await?;

        // 2. No overlap with any existing slot, regardless of status
        let overlapping = tx
            .find_overlapping_slots(range, SlotStatus::ALL)
            .await?;
        if !overlapping.is_empty() {
            return Err(AvailabilityError::SlotOverlap);
        }

        // 3. Persist
        let slot = AvailabilitySlot::new(SlotId::new(), cmd.sitter_id, range);
        tx.insert_slot(&slot).await?;
        tx.commit().await?;

        info!(slot_id = %slot.id(), sitter_id = %slot.sitter_id(), "slot created");
        Ok(slot)
    }
}
