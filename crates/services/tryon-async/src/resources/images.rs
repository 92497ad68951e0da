use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;

use crate::{client::Client, config::Config, error::TryOnError};

/// Fetches images referenced by the server: catalog previews and try-on results
pub struct Images<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Images<'c, C> {
    /// Creates a new Images resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Returns the bytes behind an image reference.
    ///
    /// `data:` URLs are decoded locally; server-relative paths are resolved against
    /// the base URL and downloaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or a data URL is malformed.
    pub async fn fetch(&self, src: &str) -> Result<Bytes, TryOnError> {
        if let Some(data) = src.strip_prefix("data:") {
            return decode_data_url(data).map(Bytes::from);
        }
        self.client.get_bytes(src).await
    }

    /// Absolute URL for an image reference, suitable for display
    #[must_use]
    pub fn resolve(&self, src: &str) -> String {
        if src.starts_with("data:") {
            return src.to_string();
        }
        self.client.config().url(src)
    }
}

fn decode_data_url(data: &str) -> Result<Vec<u8>, TryOnError> {
    let (meta, payload) = data
        .split_once(',')
        .ok_or_else(|| TryOnError::Serde("data URL without ',' separator".into()))?;
    if !meta.ends_with(";base64") {
        return Ok(payload.as_bytes().to_vec());
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| TryOnError::Serde(format!("invalid base64 in data URL: {e}")))
}

impl<C: Config> crate::Client<C> {
    /// Returns the Images resource
    #[must_use]
    pub const fn images(&self) -> Images<'_, C> {
        Images::new(self)
    }
}
