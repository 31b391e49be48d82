//! Review-specific error types.

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, ReviewId, ValidationError,
};

/// Errors surfaced by review operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    /// Review was not found.
    NotFound(ReviewId),
    /// The booking already has a review.
    AlreadyExists(String),
    /// Reviews can only be written for completed bookings.
    BookingNotCompleted,
    /// Booking was not found.
    BookingNotFound(BookingId),
    /// Actor is not allowed to touch this review.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ReviewError {
    pub fn not_found(id: ReviewId) -> Self {
        ReviewError::NotFound(id)
    }

    pub fn already_exists(booking_id: BookingId) -> Self {
        ReviewError::AlreadyExists(format!("Booking {} already has a review", booking_id))
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ReviewError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ReviewError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReviewError::NotFound(_) => ErrorCode::ReviewNotFound,
            ReviewError::AlreadyExists(_) => ErrorCode::ReviewAlreadyExists,
            ReviewError::BookingNotCompleted => ErrorCode::BookingNotCompleted,
            ReviewError::BookingNotFound(_) => ErrorCode::BookingNotFound,
            ReviewError::Forbidden => ErrorCode::Forbidden,
            ReviewError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ReviewError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReviewError::NotFound(id) => format!("Review not found: {}", id),
            ReviewError::AlreadyExists(msg) => msg.clone(),
            ReviewError::BookingNotCompleted => {
                "Reviews can only be written for completed bookings".to_string()
            }
            ReviewError::BookingNotFound(id) => format!("Booking not found: {}", id),
            ReviewError::Forbidden => "Permission denied".to_string(),
            ReviewError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ReviewError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReviewError {}

impl From<ValidationError> for ReviewError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::OutOfRange { field, .. } => {
                ReviewError::validation(field.clone(), err.to_string())
            }
            _ => ReviewError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<DomainError> for ReviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ReviewError::Forbidden,
            ErrorCode::ReviewAlreadyExists => ReviewError::AlreadyExists(err.message),
            _ => ReviewError::Infrastructure(err.to_string()),
        }
    }
}
