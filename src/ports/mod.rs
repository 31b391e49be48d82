//! Ports - trait interfaces between the application layer and the outside
//! world. Adapters implement these; handlers depend only on the traits.

mod availability_reader;
mod booking_reader;
mod profile_directory;
mod rating_store;
mod review_repository;
mod timeline;

pub use availability_reader::{AvailabilityFilter, AvailabilityReader};
pub use booking_reader::BookingReader;
pub use profile_directory::ProfileDirectory;
pub use rating_store::RatingStore;
pub use review_repository::ReviewRepository;
pub use timeline::{TimelineStore, TimelineTx};
