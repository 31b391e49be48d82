//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Pawsit domain.

mod actor;
mod errors;
mod ids;
mod money;
mod rating;
mod state_machine;
mod time_range;
mod timestamp;

pub use actor::Actor;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{BookingId, OwnerId, PetId, ReviewId, SitterId, SlotId};
pub use money::PriceQuote;
pub use rating::ReviewRating;
pub use state_machine::StateMachine;
pub use time_range::TimeRange;
pub use timestamp::Timestamp;
