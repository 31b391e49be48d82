//! Booking-specific error types.
//!
//! Every variant here is a client-input validation failure scoped to a single
//! request; none is fatal and none is retried internally. The one exception is
//! `Conflict`, which the handlers produce only after transparent retries of a
//! concurrency-induced write conflict have been exhausted.

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, ValidationError};

/// Errors surfaced by booking creation and lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// End time is not after start time.
    InvalidTimeRange(String),
    /// Blocked time or manually booked time overlaps the requested window.
    SitterUnavailable,
    /// No open slots overlap the requested window.
    NoAvailability,
    /// Open slots overlap but do not fully cover the requested window.
    IncompleteCoverage,
    /// Another requested/confirmed booking overlaps the window.
    BookingConflict,
    /// Pet set is empty or contains a pet the requesting owner does not own.
    InvalidPetOwnership(String),
    /// The actor's role or the booking's current state forbids the transition.
    ForbiddenTransition(String),
    /// The actor is neither the booking's owner nor its sitter.
    NotParticipant,
    /// Booking was not found.
    NotFound(BookingId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Concurrent write conflict, not resolved by retrying.
    Conflict,
    /// Infrastructure error.
    Infrastructure(String),
}

impl BookingError {
    pub fn invalid_pet_ownership(message: impl Into<String>) -> Self {
        BookingError::InvalidPetOwnership(message.into())
    }

    pub fn forbidden_transition(message: impl Into<String>) -> Self {
        BookingError::ForbiddenTransition(message.into())
    }

    pub fn not_found(id: BookingId) -> Self {
        BookingError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::InvalidTimeRange(_) => ErrorCode::InvalidTimeRange,
            BookingError::SitterUnavailable => ErrorCode::SitterUnavailable,
            BookingError::NoAvailability => ErrorCode::NoAvailability,
            BookingError::IncompleteCoverage => ErrorCode::IncompleteCoverage,
            BookingError::BookingConflict => ErrorCode::BookingConflict,
            BookingError::InvalidPetOwnership(_) => ErrorCode::InvalidPetOwnership,
            BookingError::ForbiddenTransition(_) => ErrorCode::ForbiddenTransition,
            BookingError::NotParticipant => ErrorCode::NotParticipant,
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BookingError::Conflict => ErrorCode::Conflict,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BookingError::InvalidTimeRange(msg) => msg.clone(),
            BookingError::SitterUnavailable => {
                "Sitter has blocked time or existing bookings in this period".to_string()
            }
            BookingError::NoAvailability => {
                "Sitter has no open availability in this period".to_string()
            }
            BookingError::IncompleteCoverage => {
                "Available slots don't fully cover the requested period".to_string()
            }
            BookingError::BookingConflict => {
                "Sitter already has a booking overlapping this period".to_string()
            }
            BookingError::InvalidPetOwnership(msg) => msg.clone(),
            BookingError::ForbiddenTransition(msg) => msg.clone(),
            BookingError::NotParticipant => {
                "Actor is not a participant in this booking".to_string()
            }
            BookingError::NotFound(id) => format!("Booking not found: {}", id),
            BookingError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            BookingError::Conflict => "Write conflict, try again".to_string(),
            BookingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::EndNotAfterStart { .. } => {
                BookingError::InvalidTimeRange(err.to_string())
            }
            ValidationError::EmptyField { field } => {
                BookingError::validation(field.clone(), err.to_string())
            }
            _ => BookingError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidTimeRange => BookingError::InvalidTimeRange(err.message),
            ErrorCode::SitterUnavailable => BookingError::SitterUnavailable,
            ErrorCode::NoAvailability => BookingError::NoAvailability,
            ErrorCode::IncompleteCoverage => BookingError::IncompleteCoverage,
            ErrorCode::BookingConflict => BookingError::BookingConflict,
            ErrorCode::InvalidPetOwnership => BookingError::InvalidPetOwnership(err.message),
            ErrorCode::ForbiddenTransition => BookingError::ForbiddenTransition(err.message),
            ErrorCode::NotParticipant => BookingError::NotParticipant,
            ErrorCode::Conflict => BookingError::Conflict,
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}
