//! TransitionBookingHandler - Command handler for booking status changes.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::reconciler::AvailabilityReconciler;
use crate::domain::booking::{authorize_transition, Booking, BookingError, BookingStatus};
use crate::domain::foundation::{Actor, BookingId};
use crate::ports::{BookingReader, TimelineStore};

const MAX_CONFLICT_RETRIES: u32 = 3;

/// Command to move a booking to a new lifecycle status.
#[derive(Debug, Clone)]
pub struct TransitionBookingCommand {
    pub booking_id: BookingId,
    pub actor: Actor,
    pub new_status: BookingStatus,
}

/// Handler for booking lifecycle transitions.
///
/// The booking is re-read inside the timeline transaction, so the policy check
/// runs against the current status even when a concurrent transition landed
/// between the initial lookup and the lock.
pub struct TransitionBookingHandler {
    timeline: Arc<dyn TimelineStore>,
    bookings: Arc<dyn BookingReader>,
}

impl TransitionBookingHandler {
    pub fn new(timeline: Arc<dyn TimelineStore>, bookings: Arc<dyn BookingReader>) -> Self {
        Self { timeline, bookings }
    }

    pub async fn handle(&self, cmd: TransitionBookingCommand) -> Result<Booking, BookingError> {
        // The sitter is only known once the booking is loaded; the unlocked
        // read is just to learn which timeline to lock.
        let preview = self
            .bookings
            .find_by_id(cmd.booking_id)
            .await?
            .ok_or(BookingError::not_found(cmd.booking_id))?;

        let mut attempt = 0;
        loop {
            match self.try_transition(&cmd, preview.sitter_id()).await {
                Err(BookingError::Conflict) if attempt + 1 < MAX_CONFLICT_RETRIES => {
                    attempt += 1;
                    warn!(
                        booking_id = %cmd.booking_id,
                        attempt,
                        "write conflict transitioning booking, retrying"
                    );
                }
                result => return result,
            }
        }
    }

    async fn try_transition(
        &self,
        cmd: &TransitionBookingCommand,
        sitter_id: crate::domain::foundation::SitterId,
    ) -> Result<Booking, BookingError> {
        let mut tx = self.timeline.begin(sitter_id).await?;

        // 1. Re-read under the lock
        let mut booking = tx
            .find_booking(cmd.booking_id)
            .await?
            .ok_or(BookingError::not_found(cmd.booking_id))?;

        // 2. Role and state-machine policy
        authorize_transition(&booking, cmd.actor, cmd.new_status)?;

        // 3. Apply and persist
        let old_status = booking.status();
        booking.set_status(cmd.new_status);
        tx.update_booking_status(&booking).await?;

        // 4. Reconcile slot statuses
        AvailabilityReconciler::on_transition(tx.as_mut(), old_status, cmd.new_status, &booking)
            .await?;

        tx.commit().await?;

        info!(
            booking_id = %booking.id(),
            actor = %cmd.actor,
            from = %old_status,
            to = %cmd.new_status,
            "booking transitioned"
        );
        Ok(booking)
    }
}
