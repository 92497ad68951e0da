use crate::{
    client::Client,
    config::Config,
    error::TryOnError,
    types::{Feedback, FeedbackResponse},
};

/// API resource for `POST /api/feedback`
pub struct FeedbackResource<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> FeedbackResource<'c, C> {
    /// Creates a new Feedback resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// Records a rating and comment for the last result
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects the entry.
    pub async fn create(&self, feedback: &Feedback) -> Result<FeedbackResponse, TryOnError> {
        self.client.post("/api/feedback", feedback).await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Feedback API resource
    #[must_use]
    pub const fn feedback(&self) -> FeedbackResource<'_, C> {
        FeedbackResource::new(self)
    }
}
