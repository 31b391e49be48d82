//! Availability-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SlotId, ValidationError};

/// Errors surfaced by the availability slot operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// The requested range is inverted or empty.
    InvalidTimeRange(String),
    /// The slot would overlap another slot of the same sitter.
    SlotOverlap,
    /// The slot overlaps an active booking and cannot be edited or deleted.
    SlotClaimed,
    /// Slot was not found.
    NotFound(SlotId),
    /// Acting sitter does not own the slot.
    Forbidden,
    /// Concurrent write conflict, not resolved by retrying.
    Conflict,
    /// Infrastructure error.
    Infrastructure(String),
}

impl AvailabilityError {
    pub fn not_found(id: SlotId) -> Self {
        AvailabilityError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AvailabilityError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AvailabilityError::InvalidTimeRange(_) => ErrorCode::InvalidTimeRange,
            AvailabilityError::SlotOverlap => ErrorCode::SlotOverlap,
            AvailabilityError::SlotClaimed => ErrorCode::SlotClaimed,
            AvailabilityError::NotFound(_) => ErrorCode::SlotNotFound,
            AvailabilityError::Forbidden => ErrorCode::Forbidden,
            AvailabilityError::Conflict => ErrorCode::Conflict,
            AvailabilityError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AvailabilityError::InvalidTimeRange(msg) => msg.clone(),
            AvailabilityError::SlotOverlap => {
                "Slot overlaps an existing slot for this sitter".to_string()
            }
            AvailabilityError::SlotClaimed => {
                "Slot overlaps an active booking and cannot be changed".to_string()
            }
            AvailabilityError::NotFound(id) => format!("Availability slot not found: {}", id),
            AvailabilityError::Forbidden => "Sitter does not own this slot".to_string(),
            AvailabilityError::Conflict => "Write conflict, try again".to_string(),
            AvailabilityError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AvailabilityError {}

impl From<ValidationError> for AvailabilityError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EndNotAfterStart { .. } => {
                AvailabilityError::InvalidTimeRange(err.to_string())
            }
            _ => AvailabilityError::Infrastructure(err.to_string()),
        }
    }
}

impl From<DomainError> for AvailabilityError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidTimeRange => AvailabilityError::InvalidTimeRange(err.message),
            ErrorCode::SlotOverlap => AvailabilityError::SlotOverlap,
            ErrorCode::SlotClaimed => AvailabilityError::SlotClaimed,
            ErrorCode::Forbidden => AvailabilityError::Forbidden,
            ErrorCode::Conflict => AvailabilityError::Conflict,
            _ => AvailabilityError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_variants() {
        assert_eq!(
            AvailabilityError::SlotOverlap.code(),
            ErrorCode::SlotOverlap
        );
        assert_eq!(AvailabilityError::SlotClaimed.code(), ErrorCode::SlotClaimed);
        assert_eq!(AvailabilityError::Forbidden.code(), ErrorCode::Forbidden);
    }

    #[test]
    fn forbidden_domain_error_maps_to_forbidden() {
        let err = DomainError::new(ErrorCode::Forbidden, "not yours");
        assert_eq!(AvailabilityError::from(err), AvailabilityError::Forbidden);
    }
}
