use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;

use crate::error::TryOnError;

/// Customer photo chosen for a try-on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerImage {
    /// File name reported in the multipart part
    pub file_name: String,
    /// MIME type guessed from the extension
    pub mime: String,
    /// Raw file contents
    pub bytes: Bytes,
}

impl CustomerImage {
    /// Builds an image from in-memory bytes
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        Self {
            mime: mime_for(&file_name).to_string(),
            file_name,
            bytes: bytes.into(),
        }
    }

    /// Reads an image from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, TryOnError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::from_bytes(file_name, bytes))
    }

    /// Renders the image as a `data:` URL for previewing
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Inputs for one try-on submission
///
/// Both fields are optional so the front end can represent a partially filled form;
/// [`crate::ui::Submitter`] rejects incomplete forms before sending anything.
#[derive(Debug, Clone, Default)]
pub struct TryOnForm {
    /// Chosen customer photo
    pub customer_image: Option<CustomerImage>,
    /// Selected clothing identifier
    pub clothing_id: Option<String>,
}

impl TryOnForm {
    /// Creates an empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the customer photo
    #[must_use]
    pub fn with_customer_image(mut self, image: CustomerImage) -> Self {
        self.customer_image = Some(image);
        self
    }

    /// Sets the clothing identifier
    #[must_use]
    pub fn with_clothing_id(mut self, id: impl Into<String>) -> Self {
        self.clothing_id = Some(id.into());
        self
    }

    /// Returns both inputs when the form is complete.
    ///
    /// An empty clothing id counts as no selection.
    #[must_use]
    pub fn complete(&self) -> Option<(&CustomerImage, &str)> {
        let image = self.customer_image.as_ref()?;
        let id = self.clothing_id.as_deref().filter(|id| !id.is_empty())?;
        Some((image, id))
    }
}
