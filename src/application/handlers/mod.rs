//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! ports. Anything that writes to a sitter's timeline goes through a
//! [`crate::ports::TimelineStore`] transaction.

pub mod availability;
pub mod booking;
pub mod review;
