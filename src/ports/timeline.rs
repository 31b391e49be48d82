//! Sitter timeline port (write side).
//!
//! The sitter's timeline -- availability slots plus bookings -- is the
//! contended resource in this system. Every operation that validates against
//! it and then writes to it must do both inside one unit: validation reads,
//! the entity write, and the reconciler's slot updates either all commit or
//! all roll back. A failure partway through must never leave a
//! partially-booked timeline visible to other callers.
//!
//! # Design
//!
//! - **Per-sitter scope**: a transaction is opened for one sitter and all
//!   queries are implicitly scoped to that sitter. There is no cross-sitter
//!   contention, so implementations lock per sitter, never globally.
//! - **Serialized**: two concurrent transactions for the same sitter must not
//!   interleave between validation reads and writes. The Postgres adapter
//!   takes a sitter-keyed advisory lock; in-memory test implementations use a
//!   mutex.
//! - Dropping a [`TimelineTx`] without calling `commit` rolls it back.

use async_trait::async_trait;

use crate::domain::availability::{AvailabilitySlot, SlotStatus};
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, DomainError, SitterId, SlotId, TimeRange};

/// Entry point for serialized, transactional access to one sitter's timeline.
#[async_trait]
pub trait TimelineStore: Send + Sync {
    /// Opens a transaction over the given sitter's slots and bookings.
    ///
    /// Blocks until any other in-flight transaction for the same sitter has
    /// finished.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` if the transaction cannot be opened
    async fn begin(&self, sitter_id: SitterId) -> Result<Box<dyn TimelineTx>, DomainError>;
}

/// A transaction over one sitter's timeline.
///
/// Query methods use half-open interval semantics throughout:
/// `slot.start < range.end AND slot.end > range.start`; touching endpoints do
/// not count as overlap.
#[async_trait]
pub trait TimelineTx: Send {
    /// Slots of this sitter overlapping `range` with status in `statuses`.
    async fn find_overlapping_slots(
        &mut self,
        range: TimeRange,
        statuses: &[SlotStatus],
    ) -> Result<Vec<AvailabilitySlot>, DomainError>;

    /// Bookings of this sitter overlapping `range` with status in `statuses`,
    /// excluding `exclude` when given (the booking being updated).
    async fn find_overlapping_bookings(
        &mut self,
        range: TimeRange,
        statuses: &[BookingStatus],
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Loads a booking by ID. Returns `None` if not found or if it belongs to
    /// a different sitter than this transaction's.
    async fn find_booking(&mut self, id: BookingId) -> Result<Option<Booking>, DomainError>;

    /// Persists a new booking.
    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError>;

    /// Persists a booking's status and updated_at.
    ///
    /// # Errors
    ///
    /// - `BookingNotFound` if the booking doesn't exist
    async fn update_booking_status(&mut self, booking: &Booking) -> Result<(), DomainError>;

    /// Deletes a booking (administrative path only).
    async fn delete_booking(&mut self, id: BookingId) -> Result<(), DomainError>;

    /// Loads a slot by ID, scoped to this transaction's sitter.
    async fn find_slot(&mut self, id: SlotId) -> Result<Option<AvailabilitySlot>, DomainError>;

    /// Persists a new slot.
    async fn insert_slot(&mut self, slot: &AvailabilitySlot) -> Result<(), DomainError>;

    /// Persists a slot's range and status.
    ///
    /// # Errors
    ///
    /// - `SlotNotFound` if the slot doesn't exist
    async fn update_slot(&mut self, slot: &AvailabilitySlot) -> Result<(), DomainError>;

    /// Deletes a slot.
    async fn delete_slot(&mut self, id: SlotId) -> Result<(), DomainError>;

    /// Bulk status update. Side-effect only: no validation here, callers are
    /// responsible for having checked the invariants.
    async fn set_slot_status(
        &mut self,
        slot_ids: &[SlotId],
        status: SlotStatus,
    ) -> Result<(), DomainError>;

    /// Commits the transaction. Dropping without commit rolls back.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}
