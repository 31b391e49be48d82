//! Availability domain module.
//!
//! A sitter advertises open time as [`AvailabilitySlot`]s on a linear,
//! non-overlapping timeline. The booking reconciler flips slot statuses
//! between `Open` and `Booked` as bookings move through their lifecycle;
//! sitters manage `Open`/`Blocked` directly.

mod errors;
mod slot;
mod status;

pub use errors::AvailabilityError;
pub use slot::AvailabilitySlot;
pub use status::SlotStatus;
