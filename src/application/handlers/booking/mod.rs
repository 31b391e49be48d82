//! Booking command and query handlers.

mod create_booking;
mod delete_booking;
mod list_bookings;
mod transition_booking;

pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
pub use delete_booking::{DeleteBookingCommand, DeleteBookingHandler};
pub use list_bookings::{ListBookingsHandler, ListBookingsQuery};
pub use transition_booking::{TransitionBookingCommand, TransitionBookingHandler};
