//! Pawsit - pet-sitting marketplace backend core.
//!
//! The heart of the crate is the booking/availability consistency engine:
//! owners request bookings against a sitter's declared availability, and the
//! system guarantees that a sitter is never double-booked and that slot
//! statuses always reflect the bookings holding them.
//!
//! Layout follows hexagonal architecture:
//!
//! - [`domain`]: aggregates, value objects, and pure scheduling rules
//! - [`ports`]: trait interfaces the application layer depends on
//! - [`adapters`]: PostgreSQL and in-memory implementations of the ports
//! - [`application`]: command/query handlers and the availability reconciler

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
