use serde::{Serialize, de::DeserializeOwned};

use crate::{config::Config, error::TryOnError};

/// Try-on server client
///
/// The client is generic over a [`Config`] implementation that provides the base URL
/// and default headers. Nothing is retried: every failure is reported to the caller,
/// who decides whether to ask the user again.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::TryOnConfig> {
    /// Creates a new client with default configuration
    ///
    /// Reads `TRYON_BASE_URL` for the server location.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::TryOnConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// Only the connect phase has a timeout; try-on streams can legitimately stay
    /// open for minutes.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default reqwest client");
                reqwest::Client::new()
            });
        Self { http, config }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) async fn get<O: DeserializeOwned>(&self, path: &str) -> Result<O, TryOnError> {
        let request = self.request(reqwest::Method::GET, path)?.build()?;
        self.execute_json(request).await
    }

    pub(crate) async fn post<I, O>(&self, path: &str, body: &I) -> Result<O, TryOnError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let request = self.request(reqwest::Method::POST, path)?.json(body).build()?;
        self.execute_json(request).await
    }

    /// Sends a multipart POST and returns the response once its status is known
    /// to be a success, leaving the body unread for streaming.
    pub(crate) async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::Response, TryOnError> {
        let request = self
            .request(reqwest::Method::POST, path)?
            .multipart(form)
            .build()?;
        self.execute(request).await
    }

    /// Downloads raw bytes from a path or absolute URL
    pub(crate) async fn get_bytes(&self, url: &str) -> Result<bytes::Bytes, TryOnError> {
        let request = self.request(reqwest::Method::GET, url)?.build()?;
        Ok(self.execute(request).await?.bytes().await?)
    }

    fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, TryOnError> {
        self.config.validate()?;
        Ok(self
            .http
            .request(method, self.config.url(path))
            .headers(self.config.headers()?))
    }

    async fn execute_json<O: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<O, TryOnError> {
        let bytes = self.execute(request).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))
    }

    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, TryOnError> {
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.http.execute(request).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(crate::error::deserialize_api_error(status, &body))
    }
}
