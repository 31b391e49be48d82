//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `availability` - Sitter availability slots and their statuses
//! - `booking` - Booking lifecycle, creation validation, transition policy
//! - `review` - Post-booking reviews and rating rules

pub mod availability;
pub mod booking;
pub mod foundation;
pub mod review;
