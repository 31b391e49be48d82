//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

use super::Timestamp;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("End time {end} must be after start time {start}")]
    EndNotAfterStart { start: Timestamp, end: Timestamp },

    #[error("Amount {amount} must not be negative")]
    NegativeAmount { amount: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an inverted time range validation error.
    pub fn end_not_after_start(start: Timestamp, end: Timestamp) -> Self {
        ValidationError::EndNotAfterStart { start, end }
    }

    /// Creates a negative amount validation error.
    pub fn negative_amount(amount: impl Into<String>) -> Self {
        ValidationError::NegativeAmount {
            amount: amount.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidTimeRange,

    // Booking validation errors
    SitterUnavailable,
    NoAvailability,
    IncompleteCoverage,
    BookingConflict,
    InvalidPetOwnership,

    // Booking transition errors
    ForbiddenTransition,
    NotParticipant,

    // Availability errors
    SlotOverlap,
    SlotClaimed,

    // Review errors
    ReviewAlreadyExists,
    BookingNotCompleted,

    // Not found errors
    BookingNotFound,
    SlotNotFound,
    ReviewNotFound,

    // Authorization errors
    Forbidden,

    // Infrastructure errors
    Conflict,
    DatabaseError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidTimeRange => "INVALID_TIME_RANGE",
            ErrorCode::SitterUnavailable => "SITTER_UNAVAILABLE",
            ErrorCode::NoAvailability => "NO_AVAILABILITY",
            ErrorCode::IncompleteCoverage => "INCOMPLETE_COVERAGE",
            ErrorCode::BookingConflict => "BOOKING_CONFLICT",
            ErrorCode::InvalidPetOwnership => "INVALID_PET_OWNERSHIP",
            ErrorCode::ForbiddenTransition => "FORBIDDEN_TRANSITION",
            ErrorCode::NotParticipant => "NOT_PARTICIPANT",
            ErrorCode::SlotOverlap => "SLOT_OVERLAP",
            ErrorCode::SlotClaimed => "SLOT_CLAIMED",
            ErrorCode::ReviewAlreadyExists => "REVIEW_ALREADY_EXISTS",
            ErrorCode::BookingNotCompleted => "BOOKING_NOT_COMPLETED",
            ErrorCode::BookingNotFound => "BOOKING_NOT_FOUND",
            ErrorCode::SlotNotFound => "SLOT_NOT_FOUND",
            ErrorCode::ReviewNotFound => "REVIEW_NOT_FOUND",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates a write-conflict error (serialization failure, retryable).
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true if the error is a retryable write conflict.
    pub fn is_conflict(&self) -> bool {
        self.code == ErrorCode::Conflict
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EndNotAfterStart { .. } => ErrorCode::InvalidTimeRange,
            _ => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("pets");
        assert_eq!(format!("{}", err), "Field 'pets' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("rating", 1, 5, 7);
        assert_eq!(
            format!("{}", err),
            "Field 'rating' must be between 1 and 5, got 7"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::BookingConflict, "Sitter already booked");
        assert_eq!(format!("{}", err), "[BOOKING_CONFLICT] Sitter already booked");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "price_quote");

        assert_eq!(err.details.get("field"), Some(&"price_quote".to_string()));
    }

    #[test]
    fn inverted_range_maps_to_invalid_time_range() {
        let err = ValidationError::end_not_after_start(
            Timestamp::from_unix_secs(100),
            Timestamp::from_unix_secs(50),
        );
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::InvalidTimeRange);
    }

    #[test]
    fn conflict_is_retryable() {
        assert!(DomainError::conflict("serialization failure").is_conflict());
        assert!(!DomainError::database("broken pipe").is_conflict());
    }
}
