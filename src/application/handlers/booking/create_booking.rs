//! CreateBookingHandler - Command handler for requesting a booking.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::reconciler::AvailabilityReconciler;
use crate::domain::availability::SlotStatus;
use crate::domain::booking::{
    check_open_coverage, Booking, BookingError, BookingStatus, ServiceType,
};
use crate::domain::foundation::{
    BookingId, OwnerId, PetId, PriceQuote, SitterId, TimeRange, Timestamp,
};
use crate::ports::{ProfileDirectory, TimelineStore};

/// Transparent retries of a concurrency-induced write conflict before the
/// error is surfaced to the caller.
const MAX_CONFLICT_RETRIES: u32 = 3;

/// Command to create a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub owner_id: OwnerId,
    pub sitter_id: SitterId,
    pub pets: Vec<PetId>,
    pub service_type: ServiceType,
    pub start: Timestamp,
    pub end: Timestamp,
    pub price_quote: PriceQuote,
    /// Start the booking at `Confirmed` instead of `Requested`. Reserved for
    /// callers acting on the sitter's behalf.
    pub confirm_immediately: bool,
}

/// Handler for booking creation.
///
/// Validation order inside the timeline transaction:
///
/// 1. time range is well-formed
/// 2. no overlapping active booking (conflict beats slot status, so time held
///    by a confirmed booking reports as a booking conflict rather than a
///    blocked slot)
/// 3. no overlapping booked/blocked slot
/// 4. open slots cover the requested window
/// 5. every pet belongs to the requesting owner
pub struct CreateBookingHandler {
    timeline: Arc<dyn TimelineStore>,
    profiles: Arc<dyn ProfileDirectory>,
}

impl CreateBookingHandler {
    pub fn new(timeline: Arc<dyn TimelineStore>, profiles: Arc<dyn ProfileDirectory>) -> Self {
        Self { timeline, profiles }
    }

    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<Booking, BookingError> {
        // 1. Validate the requested window
        let range = TimeRange::new(cmd.start, cmd.end)?;

        let mut attempt = 0;
        loop {
            match self.try_create(&cmd, range).await {
                Err(BookingError::Conflict) if attempt + 1 < MAX_CONFLICT_RETRIES => {
                    attempt += 1;
                    warn!(
                        sitter_id = %cmd.sitter_id,
                        attempt,
                        "write conflict creating booking, retrying"
                    );
                }
                result => return result,
            }
        }
    }

    async fn try_create(
        &self,
        cmd: &CreateBookingCommand,
        range: TimeRange,
    ) -> Result<Booking, BookingError> {
        let mut tx = self.timeline.begin(cmd.sitter_id).await?;

        // 2. Reject overlap with another active booking
        let conflicting = tx
            .find_overlapping_bookings(range, &BookingStatus::ACTIVE, None)
            .await?;
        if !conflicting.is_empty() {
            return Err(BookingError::BookingConflict);
        }

        // 3. Reject overlap with booked or blocked time
        let unavailable = tx
            .find_overlapping_slots(range, &[SlotStatus::Booked, SlotStatus::Blocked])
            .await?;
        if !unavailable.is_empty() {
            return Err(BookingError::SitterUnavailable);
        }

        // 4. Open slots must cover the whole window
        let open = tx
            .find_overlapping_slots(range, &[SlotStatus::Open])
            .await?;
        check_open_coverage(&open, &range)?;

        // 5. Every pet must belong to the requesting owner
        if cmd.pets.is_empty() {
            return Err(BookingError::invalid_pet_ownership(
                "Booking must include at least one pet",
            ));
        }
        for pet_id in &cmd.pets {
            match self.profiles.pet_owner(*pet_id).await? {
                Some(owner_id) if owner_id == cmd.owner_id => {}
                _ => {
                    return Err(BookingError::invalid_pet_ownership(format!(
                        "Pet {} does not belong to the requesting owner",
                        pet_id
                    )));
                }
            }
        }

        // 6. Persist, reconciling slots if the booking starts confirmed
        let status = if cmd.confirm_immediately {
            BookingStatus::Confirmed
        } else {
            BookingStatus::Requested
        };
        let booking = Booking::new(
            BookingId::new(),
            cmd.owner_id,
            cmd.sitter_id,
            cmd.pets.clone(),
            cmd.service_type,
            range,
            cmd.price_quote,
            status,
        )?;
        tx.insert_booking(&booking).await?;
        if status == BookingStatus::Confirmed {
            AvailabilityReconciler::mark_booked(tx.as_mut(), &booking).await?;
        }
        tx.commit().await?;

        info!(
            booking_id = %booking.id(),
            sitter_id = %booking.sitter_id(),
            status = %booking.status(),
            "booking created"
        );
        Ok(booking)
    }
}
