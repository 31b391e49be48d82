//! Service types a sitter can be booked for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of pet-care service covered by a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[default]
    HouseSitting,
    PetBoarding,
    InHomeVisit,
    PetGrooming,
    PetWalking,
}

impl ServiceType {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::HouseSitting => "House Sitting",
            ServiceType::PetBoarding => "Pet Boarding",
            ServiceType::InHomeVisit => "In-Home Visit",
            ServiceType::PetGrooming => "Pet Grooming",
            ServiceType::PetWalking => "Pet Walking",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
