//! Availability slot aggregate entity.
//!
//! A slot is a sitter-declared interval on that sitter's timeline. Slots for
//! one sitter must not overlap each other; that rule is enforced at
//! creation/update time by the slot handlers, not re-validated here.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, SitterId, SlotId, TimeRange};

use super::SlotStatus;

/// A sitter-declared open/booked/blocked time interval.
///
/// # Invariants
///
/// - `range.end > range.start` (guaranteed by [`TimeRange`])
/// - only the owning sitter may edit or delete the slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    id: SlotId,
    sitter_id: SitterId,
    range: TimeRange,
    status: SlotStatus,
}

impl AvailabilitySlot {
    /// Creates a new open slot.
    pub fn new(id: SlotId, sitter_id: SitterId, range: TimeRange) -> Self {
        Self {
            id,
            sitter_id,
            range,
            status: SlotStatus::Open,
        }
    }

    /// Reconstitute a slot from persistence (no validation).
    pub fn reconstitute(
        id: SlotId,
        sitter_id: SitterId,
        range: TimeRange,
        status: SlotStatus,
    ) -> Self {
        Self {
            id,
            sitter_id,
            range,
            status,
        }
    }

    /// Returns the slot ID.
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Returns the owning sitter's ID.
    pub fn sitter_id(&self) -> SitterId {
        self.sitter_id
    }

    /// Returns the slot's time range.
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Returns the current status.
    pub fn status(&self) -> SlotStatus {
        self.status
    }

    /// Checks if the given sitter owns this slot.
    pub fn is_owned_by(&self, sitter_id: SitterId) -> bool {
        self.sitter_id == sitter_id
    }

    /// Validates that the sitter can edit this slot.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the sitter does not own the slot
    pub fn authorize(&self, sitter_id: SitterId) -> Result<(), DomainError> {
        if self.is_owned_by(sitter_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Sitter does not own this availability slot",
            ))
        }
    }

    /// Moves the slot to a new time range.
    pub fn reschedule(&mut self, range: TimeRange) {
        self.range = range;
    }

    /// Sets the slot status. No transition validation: the reconciler and the
    /// sitter-facing update handler are the only callers and each enforces its
    /// own rules.
    pub fn set_status(&mut self, status: SlotStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn test_range(start: i64, end: i64) -> TimeRange {
        TimeRange::new(
            Timestamp::from_unix_secs(start),
            Timestamp::from_unix_secs(end),
        )
        .unwrap()
    }

    fn test_slot(sitter: SitterId) -> AvailabilitySlot {
        AvailabilitySlot::new(SlotId::new(), sitter, test_range(0, 3600))
    }

    #[test]
    fn new_slot_starts_open() {
        let slot = test_slot(SitterId::new());
        assert_eq!(slot.status(), SlotStatus::Open);
    }

    #[test]
    fn owner_is_authorized() {
        let sitter = SitterId::new();
        let slot = test_slot(sitter);
        assert!(slot.authorize(sitter).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let slot = test_slot(SitterId::new());
        let result = slot.authorize(SitterId::new());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::Forbidden);
    }

    #[test]
    fn reschedule_replaces_range() {
        let mut slot = test_slot(SitterId::new());
        let new_range = test_range(7200, 10800);
        slot.reschedule(new_range);
        assert_eq!(slot.range(), new_range);
    }

    #[test]
    fn set_status_updates_status() {
        let mut slot = test_slot(SitterId::new());
        slot.set_status(SlotStatus::Booked);
        assert_eq!(slot.status(), SlotStatus::Booked);
    }
}
