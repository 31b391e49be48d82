//! Booking domain module.
//!
//! The heart of the marketplace: booking creation validation, the lifecycle
//! state machine (requested -> confirmed -> completed/canceled), and the pure
//! policy/coverage rules the handlers apply inside a sitter-timeline
//! transaction.

mod aggregate;
mod coverage;
mod errors;
mod policy;
mod service_type;
mod status;

pub use aggregate::Booking;
pub use coverage::check_open_coverage;
pub use errors::BookingError;
pub use policy::authorize_transition;
pub use service_type::ServiceType;
pub use status::BookingStatus;
