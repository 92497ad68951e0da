use std::path::Path;

use crate::{error::TryOnError, types::CustomerImage};

use super::ImagePreview;

/// Proof that a load was started by the latest file change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket(u64);

/// Customer-photo binding.
///
/// Reading a file is asynchronous, so a slow load for an older choice could finish
/// after a newer one. Every change bumps a generation and only a load holding the
/// latest ticket may publish.
#[derive(Debug, Default)]
pub struct CustomerPreview {
    generation: u64,
}

impl CustomerPreview {
    /// Creates a binding with no file chosen
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a file change. Clearing the choice hides the preview immediately.
    pub fn begin(
        &mut self,
        path: Option<&Path>,
        preview: &mut ImagePreview,
    ) -> Option<PreviewTicket> {
        self.generation += 1;
        if path.is_none() {
            preview.hide();
            return None;
        }
        Some(PreviewTicket(self.generation))
    }

    /// Publishes a loaded image if `ticket` is still current; returns whether it was shown
    pub fn apply(
        &self,
        ticket: PreviewTicket,
        image: &CustomerImage,
        preview: &mut ImagePreview,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(file = %image.file_name, "dropping superseded preview");
            return false;
        }
        preview.show(image.to_data_url());
        true
    }

    /// Handles a file change end to end: hide on clear, otherwise load and show.
    ///
    /// Returns the loaded image so the caller can keep it for submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read; the preview is left unchanged.
    pub async fn on_change(
        &mut self,
        path: Option<&Path>,
        preview: &mut ImagePreview,
    ) -> Result<Option<CustomerImage>, TryOnError> {
        let (Some(ticket), Some(path)) = (self.begin(path, preview), path) else {
            return Ok(None);
        };
        let image = CustomerImage::load(path).await?;
        self.apply(ticket, &image, preview);
        Ok(Some(image))
    }
}
