//! Front-end state for the try-on flow.
//!
//! Each visible element is a plain struct, and each handler takes `&mut` only to
//! the elements it changes. Front ends draw the structs after handlers run (see
//! [`Notifier::render`]).

mod catalog;
mod preview;
mod submit;

pub use catalog::{CatalogOption, CatalogSelect, load_catalog, on_clothing_change};
pub use preview::{CustomerPreview, PreviewTicket};
pub use submit::{SubmissionState, Submitter, VALIDATION_MESSAGE, dispatch};

/// Progress bar with a numeric label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressIndicator {
    visible: bool,
    percent: f64,
    status: Option<String>,
}

impl ProgressIndicator {
    /// Shows the indicator at 0%
    pub fn reset(&mut self) {
        self.visible = true;
        self.percent = 0.0;
        self.status = None;
    }

    /// Moves the indicator to `percent`, keeping the server's status label if any
    pub fn set(&mut self, percent: f64, status: Option<String>) {
        self.percent = percent;
        self.status = status;
    }

    /// Hides the indicator; the last value is kept
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the indicator is shown
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last reported percentage, unclamped
    #[must_use]
    pub const fn percent(&self) -> f64 {
        self.percent
    }

    /// Fill width in 0..=100
    #[must_use]
    pub fn width(&self) -> f64 {
        self.percent.clamp(0.0, 100.0)
    }

    /// Status label sent with the last progress event
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Numeric label, e.g. `55%`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }
}

/// An image element that is either shown with a source or hidden
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePreview {
    src: Option<String>,
    visible: bool,
}

impl ImagePreview {
    /// Shows `src`
    pub fn show(&mut self, src: impl Into<String>) {
        self.src = Some(src.into());
        self.visible = true;
    }

    /// Hides the element
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the element is shown
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// The source currently on display, if shown
    #[must_use]
    pub fn displayed(&self) -> Option<&str> {
        self.src.as_deref().filter(|_| self.visible)
    }
}

/// Elements a submission updates: the progress indicator and the result image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultView {
    /// Progress bar
    pub progress: ProgressIndicator,
    /// Composited result
    pub result: ImagePreview,
}

/// User-facing side effects of the try-on flow
pub trait Notifier {
    /// Shows a blocking message to the user
    fn alert(&mut self, message: &str);

    /// Redraws after the view changed. The default does nothing.
    fn render(&mut self, _view: &ResultView) {}
}

/// Collects alerts; useful for tests and non-interactive callers.
impl Notifier for Vec<String> {
    fn alert(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
