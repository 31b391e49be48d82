//! Application layer: handlers plus the availability reconciler.

pub mod handlers;
pub mod reconciler;
