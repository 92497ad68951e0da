use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Default try-on server base URL
pub const TRYON_DEFAULT_BASE: &str = "http://localhost:5000";
/// Environment variable overriding the base URL
pub const ENV_BASE_URL: &str = "TRYON_BASE_URL";

/// Configuration for the try-on client
#[derive(Clone, Debug)]
pub struct TryOnConfig {
    base_url: String,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| TRYON_DEFAULT_BASE.into());

        Self { base_url }
    }
}

impl TryOnConfig {
    /// Creates a new configuration with default settings
    ///
    /// Reads `TRYON_BASE_URL` for the server base URL (defaults to
    /// `http://localhost:5000`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server base URL
    #[must_use]
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    /// Returns the configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Configuration trait for the try-on client
///
/// Implement this trait to point the client at a custom deployment or to add
/// headers (e.g., a gateway token).
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::TryOnError>;

    /// Constructs the full URL for a path or server-relative reference.
    ///
    /// Absolute `http(s)://` URLs are returned unchanged.
    fn url(&self, path: &str) -> String;

    /// Validates the configuration before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot produce usable URLs.
    fn validate(&self) -> Result<(), crate::error::TryOnError>;
}

/// Whether `s` is already an absolute HTTP(S) URL
pub(crate) fn is_absolute(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

impl Config for TryOnConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::TryOnError> {
        let mut h = HeaderMap::new();
        h.insert(ACCEPT, HeaderValue::from_static("*/*"));
        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn validate(&self) -> Result<(), crate::error::TryOnError> {
        if is_absolute(self.base_url.trim()) {
            Ok(())
        } else {
            Err(crate::error::TryOnError::Config(format!(
                "base URL must start with http:// or https://, got {:?} (set {ENV_BASE_URL})",
                self.base_url
            )))
        }
    }
}
