use std::collections::VecDeque;

use bytes::Bytes;
use futures::{StreamExt, stream::BoxStream};
use reqwest::multipart::{Form, Part};

use crate::{
    client::Client,
    config::Config,
    error::TryOnError,
    sse::FrameDecoder,
    types::{CustomerImage, StreamEvent},
};

/// API resource for `POST /api/tryon`
pub struct TryOn<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> TryOn<'c, C> {
    /// Creates a new TryOn resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Uploads the customer photo and clothing id, returning the progress stream.
    ///
    /// The returned stream has already passed the status check; nothing of the body
    /// has been read yet.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub async fn create(
        &self,
        image: &CustomerImage,
        clothing_id: &str,
    ) -> Result<ProgressStream, TryOnError> {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = Form::new()
            .part("customerImage", part)
            .text("clothingId", clothing_id.to_string());

        let response = self.client.post_multipart("/api/tryon", form).await?;
        Ok(ProgressStream::new(response.bytes_stream().boxed()))
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the TryOn API resource
    #[must_use]
    pub const fn tryon(&self) -> TryOn<'_, C> {
        TryOn::new(self)
    }
}

/// Events decoded from an in-flight try-on response
pub struct ProgressStream {
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    decoder: Option<FrameDecoder>,
    ready: VecDeque<StreamEvent>,
}

impl ProgressStream {
    /// Wraps a raw body stream
    #[must_use]
    pub fn new(body: BoxStream<'static, reqwest::Result<Bytes>>) -> Self {
        Self {
            body,
            decoder: Some(FrameDecoder::new()),
            ready: VecDeque::new(),
        }
    }

    /// Waits for the next event.
    ///
    /// Returns `None` once the body ends; a trailing incomplete frame is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection breaks mid-stream.
    pub async fn next_event(&mut self) -> Option<Result<StreamEvent, TryOnError>> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Some(Ok(event));
            }
            let decoder = self.decoder.as_mut()?;
            match self.body.next().await {
                Some(Ok(chunk)) => self.ready.extend(decoder.push(&chunk)),
                Some(Err(e)) => {
                    self.decoder = None;
                    return Some(Err(e.into()));
                }
                None => {
                    if let Some(decoder) = self.decoder.take() {
                        decoder.finish();
                    }
                    return None;
                }
            }
        }
    }
}
