//! Resolved request actor.
//!
//! Identity resolution (credentials, tokens) happens outside this crate; the
//! auth collaborator hands the core an already-resolved [`Actor`]. Carrying the
//! role as a tagged variant lets the booking policy match exhaustively instead
//! of comparing role strings.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{OwnerId, SitterId};

/// The authenticated party performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "id", rename_all = "snake_case")]
pub enum Actor {
    /// A pet owner.
    Owner(OwnerId),
    /// A sitter.
    Sitter(SitterId),
}

impl Actor {
    /// Returns the owner id if the actor is an owner.
    pub fn as_owner(&self) -> Option<OwnerId> {
        match self {
            Actor::Owner(id) => Some(*id),
            Actor::Sitter(_) => None,
        }
    }

    /// Returns the sitter id if the actor is a sitter.
    pub fn as_sitter(&self) -> Option<SitterId> {
        match self {
            Actor::Sitter(id) => Some(*id),
            Actor::Owner(_) => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actor::Owner(id) => write!(f, "owner:{}", id),
            Actor::Sitter(id) => write!(f, "sitter:{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_owner_returns_id_only_for_owner() {
        let owner = OwnerId::new();
        assert_eq!(Actor::Owner(owner).as_owner(), Some(owner));
        assert_eq!(Actor::Sitter(SitterId::new()).as_owner(), None);
    }

    #[test]
    fn as_sitter_returns_id_only_for_sitter() {
        let sitter = SitterId::new();
        assert_eq!(Actor::Sitter(sitter).as_sitter(), Some(sitter));
        assert_eq!(Actor::Owner(OwnerId::new()).as_sitter(), None);
    }

    #[test]
    fn actor_display_includes_role() {
        let sitter = SitterId::new();
        assert_eq!(
            format!("{}", Actor::Sitter(sitter)),
            format!("sitter:{}", sitter)
        );
    }
}
