#![deny(missing_docs)]

//! # `tryon-async`
//!
//! Async client for a virtual try-on server.
//!
//! The server exposes a clothing catalog, a multipart try-on endpoint that answers
//! with a stream of `data: <json>` frames, and a feedback endpoint. This crate wraps
//! all three and models the interactive front end as explicit state structs that the
//! handlers in [`ui`] mutate.
//!
//! ```no_run
//! use tryon_async::{Client, types::TryOnForm, ui::{ResultView, Submitter}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new();
//! let form = TryOnForm::new()
//!     .with_customer_image(tryon_async::types::CustomerImage::load("me.jpg").await?)
//!     .with_clothing_id("2");
//!
//! let mut view = ResultView::default();
//! let mut alerts: Vec<String> = Vec::new();
//! let result = Submitter::new(&client)
//!     .submit(&form, &mut view, &mut alerts)
//!     .await?;
//! println!("{result:?}");
//! # Ok(())
//! # }
//! ```

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// API resource implementations
pub mod resources;
/// Incremental decoder for the try-on progress stream
pub mod sse;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Request and response types
pub mod types;
/// Front-end state and the handlers that drive it
pub mod ui;

pub use crate::client::Client;
pub use crate::config::TryOnConfig;
pub use crate::error::{ApiErrorObject, TryOnError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::ui::{
        CatalogSelect, CustomerPreview, ImagePreview, Notifier, ProgressIndicator, ResultView,
        SubmissionState, Submitter,
    };
    pub use crate::{Client, TryOnConfig, TryOnError};
}
