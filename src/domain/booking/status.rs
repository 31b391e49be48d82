//! Booking lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle state of a booking.
///
/// ```text
/// Requested --confirm--> Confirmed --complete--> Completed
///     |                      |
///     +-------cancel---------+-----> Canceled
/// ```
///
/// `Completed` and `Canceled` are terminal: no further transitions are
/// permitted, whoever the actor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Owner has asked for the booking; sitter has not responded.
    Requested,
    /// Sitter accepted; the time is claimed.
    Confirmed,
    /// Service was delivered.
    Completed,
    /// Called off by either party.
    Canceled,
}

impl BookingStatus {
    /// Returns true if the booking still claims the sitter's time.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Requested | BookingStatus::Confirmed)
    }

    /// The two statuses that count as claiming a sitter's time.
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Requested, BookingStatus::Confirmed];
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            (Requested, Confirmed)
                | (Requested, Canceled)
                | (Confirmed, Completed)
                | (Confirmed, Canceled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Requested => vec![Confirmed, Canceled],
            Confirmed => vec![Completed, Canceled],
            Completed => vec![],
            Canceled => vec![],
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Requested => "requested",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Canceled => "canceled",
        };
        write!(f, "{}", s)
    }
}
