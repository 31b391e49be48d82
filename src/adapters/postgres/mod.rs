//! PostgreSQL adapters.

mod availability_reader;
mod booking_reader;
mod review_repository;
mod timeline_store;

pub use availability_reader::PostgresAvailabilityReader;
pub use booking_reader::PostgresBookingReader;
pub use review_repository::{PostgresRatingStore, PostgresReviewRepository};
pub use timeline_store::PostgresTimelineStore;
