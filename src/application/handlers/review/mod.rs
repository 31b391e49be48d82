//! Review command handlers.

mod create_review;
mod delete_review;
mod update_review;

pub use create_review::{CreateReviewCommand, CreateReviewHandler};
pub use delete_review::{DeleteReviewCommand, DeleteReviewHandler};
pub use update_review::{UpdateReviewCommand, UpdateReviewHandler};
