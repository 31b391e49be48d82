//! Availability reader port (read side).

use async_trait::async_trait;

use crate::domain::availability::AvailabilitySlot;
use crate::domain::foundation::{DomainError, SitterId};

/// Who the availability listing is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityFilter {
    /// The acting sitter's own slots (all statuses).
    Mine(SitterId),
    /// Another sitter's public calendar.
    ForSitter(SitterId),
}

impl AvailabilityFilter {
    /// Returns the sitter whose slots are requested.
    pub fn sitter_id(&self) -> SitterId {
        match self {
            AvailabilityFilter::Mine(id) | AvailabilityFilter::ForSitter(id) => *id,
        }
    }
}

/// Read-optimized queries over availability slots. No transaction, no
/// locking: listings are allowed to race with concurrent bookings.
#[async_trait]
pub trait AvailabilityReader: Send + Sync {
    /// Lists a sitter's slots ordered by start time.
    async fn list(&self, filter: AvailabilityFilter) -> Result<Vec<AvailabilitySlot>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_exposes_sitter_id() {
        let sitter = SitterId::new();
        assert_eq!(AvailabilityFilter::Mine(sitter).sitter_id(), sitter);
        assert_eq!(AvailabilityFilter::ForSitter(sitter).sitter_id(), sitter);
    }
}
