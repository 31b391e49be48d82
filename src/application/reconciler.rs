//! Availability reconciler.
//!
//! Keeps slot statuses consistent with booking lifecycle state. Runs inside
//! the caller's timeline transaction so slot flips commit or roll back with
//! the booking write they belong to.
//!
//! All operations are idempotent: statuses are assigned, never toggled, so
//! re-running against an already-consistent timeline changes nothing.

use tracing::debug;

use crate::domain::availability::SlotStatus;
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{DomainError, SlotId};
use crate::ports::TimelineTx;

/// Slot-status side effects of booking lifecycle changes.
pub struct AvailabilityReconciler;

impl AvailabilityReconciler {
    /// Marks every open slot overlapping the booking's window as booked.
    pub async fn mark_booked(
        tx: &mut dyn TimelineTx,
        booking: &Booking,
    ) -> Result<(), DomainError> {
        let open = tx
            .find_overlapping_slots(booking.range(), &[SlotStatus::Open])
            .await?;
        let slot_ids: Vec<SlotId> = open.iter().map(|s| s.id()).collect();

        if !slot_ids.is_empty() {
            tx.set_slot_status(&slot_ids, SlotStatus::Booked).await?;
        }
        debug!(
            booking_id = %booking.id(),
            slots = slot_ids.len(),
            "marked slots booked"
        );
        Ok(())
    }

    /// Reopens booked slots overlapping the booking's window, unless another
    /// active booking still claims that slot's range.
    pub async fn mark_open(
        tx: &mut dyn TimelineTx,
        booking: &Booking,
    ) -> Result<(), DomainError> {
        let booked = tx
            .find_overlapping_slots(booking.range(), &[SlotStatus::Booked])
            .await?;

        let mut freeable: Vec<SlotId> = Vec::new();
        for slot in &booked {
            let claimants = tx
                .find_overlapping_bookings(
                    slot.range(),
                    &BookingStatus::ACTIVE,
                    Some(booking.id()),
                )
                .await?;
            if claimants.is_empty() {
                freeable.push(slot.id());
            }
        }

        if !freeable.is_empty() {
            tx.set_slot_status(&freeable, SlotStatus::Open).await?;
        }
        debug!(
            booking_id = %booking.id(),
            candidates = booked.len(),
            reopened = freeable.len(),
            "reopened slots"
        );
        Ok(())
    }

    /// Applies the slot side effect of a booking status transition.
    pub async fn on_transition(
        tx: &mut dyn TimelineTx,
        old: BookingStatus,
        new: BookingStatus,
        booking: &Booking,
    ) -> Result<(), DomainError> {
        match (old, new) {
            (BookingStatus::Requested, BookingStatus::Confirmed) => {
                Self::mark_booked(tx, booking).await
            }
            (old, BookingStatus::Canceled | BookingStatus::Completed) if old.is_active() => {
                Self::mark_open(tx, booking).await
            }
            _ => Ok(()),
        }
    }

    /// Frees slots when an active booking is deleted (administrative path),
    /// mirroring the cancellation side effect.
    pub async fn on_delete(
        tx: &mut dyn TimelineTx,
        booking: &Booking,
    ) -> Result<(), DomainError> {
        if booking.is_active() {
            Self::mark_open(tx, booking).await
        } else {
            Ok(())
        }
    }
}
