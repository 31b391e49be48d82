//! Booking reader port (read side).

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{Actor, BookingId, DomainError};

/// Read-optimized queries over bookings.
///
/// Listings are actor-scoped: an owner sees only their own bookings, a sitter
/// only bookings assigned to them.
#[async_trait]
pub trait BookingReader: Send + Sync {
    /// Lists the actor's bookings, newest first.
    async fn list_for_actor(&self, actor: Actor) -> Result<Vec<Booking>, DomainError>;

    /// Loads a booking by ID. Returns `None` if not found.
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, DomainError>;
}
