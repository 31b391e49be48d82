//! Sitter rating store port.
//!
//! The original system recomputed a sitter's average rating in an implicit
//! save/delete listener. Here the review handlers call this port explicitly
//! after every review write, so the ordering is visible at the call site.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SitterId};

/// Recomputes and persists a sitter's aggregate rating.
#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Recomputes the sitter's average rating from all current reviews and
    /// stores it on the sitter profile. A sitter with no reviews resets to
    /// unrated.
    async fn recompute(&self, sitter_id: SitterId) -> Result<(), DomainError>;
}
