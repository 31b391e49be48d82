//! Review rating value object (1 to 5 stars).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Star rating an owner gives a sitter: 1 (poor) to 5 (excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum ReviewRating {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl ReviewRating {
    /// Creates a ReviewRating from an integer, returning error if out of range.
    pub fn try_from_i16(value: i16) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(ReviewRating::One),
            2 => Ok(ReviewRating::Two),
            3 => Ok(ReviewRating::Three),
            4 => Ok(ReviewRating::Four),
            5 => Ok(ReviewRating::Five),
            _ => Err(ValidationError::out_of_range("rating", 1, 5, value as i32)),
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i16 {
        *self as i16
    }
}

impl fmt::Display for ReviewRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_i16_accepts_valid_values() {
        for v in 1..=5 {
            assert_eq!(ReviewRating::try_from_i16(v).unwrap().value(), v);
        }
    }

    #[test]
    fn try_from_i16_rejects_invalid_values() {
        assert!(ReviewRating::try_from_i16(0).is_err());
        assert!(ReviewRating::try_from_i16(6).is_err());
        assert!(ReviewRating::try_from_i16(-1).is_err());
    }

    #[test]
    fn rating_ordering_works() {
        assert!(ReviewRating::One < ReviewRating::Five);
        assert!(ReviewRating::Three < ReviewRating::Four);
    }
}
