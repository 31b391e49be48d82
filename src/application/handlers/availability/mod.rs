//! Availability slot command and query handlers.

mod create_slot;
mod delete_slot;
mod list_availability;
mod update_slot;

pub use create_slot::{CreateSlotCommand, CreateSlotHandler};
pub use delete_slot::{DeleteSlotCommand, DeleteSlotHandler};
pub use list_availability::{ListAvailabilityHandler, ListAvailabilityQuery};
pub use update_slot::{UpdateSlotCommand, UpdateSlotHandler};
