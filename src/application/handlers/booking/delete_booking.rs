//! DeleteBookingHandler - Administrative removal of a booking.
//!
//! Regular actors cancel; deletion exists for data-hygiene tooling. Removing
//! an active booking frees the slots it claimed, same as a cancellation.

use std::sync::Arc;

use tracing::info;

use crate::application::reconciler::AvailabilityReconciler;
use crate::domain::booking::BookingError;
use crate::domain::foundation::BookingId;
use crate::ports::{BookingReader, TimelineStore};

/// Command to delete a booking.
#[derive(Debug, Clone)]
pub struct DeleteBookingCommand {
    pub booking_id: BookingId,
}

/// Handler for booking deletion.
pub struct DeleteBookingHandler {
    timeline: Arc<dyn TimelineStore>,
    bookings: Arc<dyn BookingReader>,
}

impl DeleteBookingHandler {
    pub fn new(timeline: Arc<dyn TimelineStore>, bookings: Arc<dyn BookingReader>) -> Self {
        Self { timeline, bookings }
    }

    pub async fn handle(&self, cmd: DeleteBookingCommand) -> Result<(), BookingError> {
        let preview = self
            .bookings
            .find_by_id(cmd.booking_id)
            .await?
            .ok_or(BookingError::not_found(cmd.booking_id))?;

        let mut tx = self.timeline.begin(preview.sitter_id()).await?;
        let booking = tx
            .find_booking(cmd.booking_id)
            .await?
            .ok_or(BookingError::not_found(cmd.booking_id))?;

        AvailabilityReconciler::on_delete(tx.as_mut(), &booking).await?;
        tx.delete_booking(booking.id()).await?;
        tx.commit().await?;

        info!(booking_id = %booking.id(), status = %booking.status(), "booking deleted");
        Ok(())
    }
}
