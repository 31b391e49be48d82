//! Review domain module.
//!
//! One review per completed booking. Creating, revising, or deleting a review
//! recomputes the sitter's average rating through the [`crate::ports::RatingStore`]
//! port -- an explicit call from the handlers, not an implicit listener.

mod aggregate;
mod errors;

pub use aggregate::Review;
pub use errors::ReviewError;
