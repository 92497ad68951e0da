//! API resource implementations for the try-on client

/// Clothing catalog resource
pub mod catalog;
/// Feedback resource
pub mod feedback;
/// Image download resource
pub mod images;
/// Try-on submission resource
pub mod tryon;

pub use catalog::Catalog;
pub use feedback::FeedbackResource;
pub use images::Images;
pub use tryon::{ProgressStream, TryOn};
