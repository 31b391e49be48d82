//! Half-open time interval value object.
//!
//! All scheduling logic in the crate works on `[start, end)` intervals:
//! a range includes its start instant and excludes its end instant, so two
//! ranges that merely touch at an endpoint do not overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Timestamp, ValidationError};

/// Half-open time interval `[start, end)`. Invariant: `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    /// Creates a time range, validating that `end > start`.
    ///
    /// # Errors
    ///
    /// - `EndNotAfterStart` if `end <= start`
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::end_not_after_start(start, end));
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive start instant.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Returns the exclusive end instant.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Checks whether two ranges overlap.
    ///
    /// Half-open semantics: `self.start < other.end AND self.end > other.start`.
    /// Touching endpoints do not count as overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Checks whether this range fully contains another.
    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
