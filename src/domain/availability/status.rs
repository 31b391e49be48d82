//! Availability slot status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an availability slot on a sitter's timeline.
///
/// `Open` and `Blocked` are sitter-managed; `Booked` is derived from the
/// booking lifecycle by the reconciler and never set directly by a sitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// Sitter is offering this time.
    Open,
    /// Claimed by a confirmed booking.
    Booked,
    /// Sitter has marked this time unavailable.
    Blocked,
}

impl SlotStatus {
    /// Every status, for queries that match slots regardless of state.
    pub const ALL: &'static [SlotStatus] =
        &[SlotStatus::Open, SlotStatus::Booked, SlotStatus::Blocked];

    /// Returns true if the slot can satisfy a new booking.
    pub fn is_open(&self) -> bool {
        matches!(self, SlotStatus::Open)
    }

    /// Returns true if the slot rejects new bookings (booked or blocked).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SlotStatus::Booked | SlotStatus::Blocked)
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlotStatus::Open => "open",
            SlotStatus::Booked => "booked",
            SlotStatus::Blocked => "blocked",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_is_open() {
        assert!(SlotStatus::Open.is_open());
        assert!(!SlotStatus::Booked.is_open());
        assert!(!SlotStatus::Blocked.is_open());
    }

    #[test]
    fn booked_and_blocked_are_unavailable() {
        assert!(SlotStatus::Booked.is_unavailable());
        assert!(SlotStatus::Blocked.is_unavailable());
        assert!(!SlotStatus::Open.is_unavailable());
    }
}
