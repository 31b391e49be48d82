//! Profile directory port (external collaborator).
//!
//! The profile subsystem owns sitter/owner/pet records. The booking core only
//! needs one fact from it: which owner a pet belongs to, so that booking
//! creation can compare it against the requesting owner. Existence and
//! identity resolution stay on the profile side.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OwnerId, PetId};

/// Lookup into the externally-owned profile store.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Returns the owner of the given pet, or `None` if the pet is unknown.
    async fn pet_owner(&self, pet_id: PetId) -> Result<Option<OwnerId>, DomainError>;
}
