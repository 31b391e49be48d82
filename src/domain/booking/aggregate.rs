//! Booking aggregate entity.
//!
//! A booking is an owner's request to reserve a sitter for pet care across a
//! time interval. It is jointly owned: the owner can cancel, the sitter can
//! confirm/complete/cancel. Status changes go through the transition policy in
//! [`super::policy`]; this entity only records the outcome.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, OwnerId, PetId, PriceQuote, SitterId, TimeRange, Timestamp, ValidationError,
};

use super::{BookingStatus, ServiceType};

/// Booking aggregate.
///
/// # Invariants
///
/// - `range.end > range.start` (guaranteed by [`TimeRange`])
/// - `pets` is non-empty
/// - `price_quote >= 0` (guaranteed by [`PriceQuote`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    owner_id: OwnerId,
    sitter_id: SitterId,
    pets: Vec<PetId>,
    service_type: ServiceType,
    range: TimeRange,
    price_quote: PriceQuote,
    status: BookingStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Booking {
    /// Creates a new booking in the given initial status.
    ///
    /// Creation normally starts at `Requested`; `Confirmed` is allowed when
    /// the caller pre-authorizes immediate confirmation.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the pet set is empty
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookingId,
        owner_id: OwnerId,
        sitter_id: SitterId,
        pets: Vec<PetId>,
        service_type: ServiceType,
        range: TimeRange,
        price_quote: PriceQuote,
        status: BookingStatus,
    ) -> Result<Self, ValidationError> {
        if pets.is_empty() {
            return Err(ValidationError::empty_field("pets"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            owner_id,
            sitter_id,
            pets,
            service_type,
            range,
            price_quote,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a booking from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: BookingId,
        owner_id: OwnerId,
        sitter_id: SitterId,
        pets: Vec<PetId>,
        service_type: ServiceType,
        range: TimeRange,
        price_quote: PriceQuote,
        status: BookingStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner_id,
            sitter_id,
            pets,
            service_type,
            range,
            price_quote,
            status,
            created_at,
            updated_at,
        }
    }

    /// Returns the booking ID.
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the requesting owner's ID.
    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the booked sitter's ID.
    pub fn sitter_id(&self) -> SitterId {
        self.sitter_id
    }

    /// Returns the pets covered by this booking.
    pub fn pets(&self) -> &[PetId] {
        &self.pets
    }

    /// Returns the booked service type.
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Returns the booked time range.
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Returns the quoted price.
    pub fn price_quote(&self) -> PriceQuote {
        self.price_quote
    }

    /// Returns the current lifecycle status.
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns when the booking was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the booking was last updated.
    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns true if the booking still claims the sitter's time.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Records a status change. Callers must have validated the transition
    /// through [`super::policy::authorize_transition`] first.
    pub fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
        self.updated_at = Timestamp::now();
    }
}
