//! Request and response types for the try-on server

/// Catalog endpoint types
pub mod catalog;
/// Progress stream events
pub mod event;
/// Feedback endpoint types
pub mod feedback;
/// Try-on submission inputs
pub mod tryon;

pub use catalog::ClothingItem;
pub use event::StreamEvent;
pub use feedback::{Feedback, FeedbackResponse};
pub use tryon::{CustomerImage, TryOnForm};
