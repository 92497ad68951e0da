use crate::{
    Client,
    config::Config,
    error::TryOnError,
    resources::ProgressStream,
    types::{StreamEvent, TryOnForm},
};

use super::{ImagePreview, Notifier, ProgressIndicator, ResultView};

/// Shown when the form is missing the photo or the clothing choice
pub const VALIDATION_MESSAGE: &str = "Please upload an image and select clothing.";

/// Lifecycle of one submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing submitted yet, or the last attempt was rejected before sending
    #[default]
    Idle,
    /// Checking the form
    Validating,
    /// Upload in flight, no response status yet
    Sending,
    /// Reading progress frames
    Streaming,
    /// A result image arrived
    Completed,
    /// The server reported an error or the connection failed
    Failed,
}

impl SubmissionState {
    /// Whether no further transitions happen until the next submission
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Applies one stream event to the progress indicator and result image.
///
/// Returns the state the submission moves to.
pub fn dispatch<N: Notifier>(
    event: StreamEvent,
    progress: &mut ProgressIndicator,
    result: &mut ImagePreview,
    notifier: &mut N,
) -> SubmissionState {
    match event {
        StreamEvent::Progress { percent, status } => {
            progress.set(percent, status);
            SubmissionState::Streaming
        }
        StreamEvent::Result { image } => {
            progress.hide();
            result.show(image);
            SubmissionState::Completed
        }
        StreamEvent::Error { message } => {
            notifier.alert(&format!("Error: {message}"));
            progress.hide();
            SubmissionState::Failed
        }
    }
}

/// Runs try-on submissions against one client.
///
/// `submit` borrows the submitter mutably for its whole run, so one submitter never
/// has two submissions in flight.
pub struct Submitter<'c, C: Config> {
    client: &'c Client<C>,
    state: SubmissionState,
}

impl<'c, C: Config> Submitter<'c, C> {
    /// Creates an idle submitter
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self {
            client,
            state: SubmissionState::Idle,
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> SubmissionState {
        self.state
    }

    /// Validates the form, uploads it, and follows the progress stream to its end.
    ///
    /// Returns `Ok(Some(image))` when a result arrived and `Ok(None)` when the stream
    /// ended without a terminal event. Every error has already been shown through
    /// `notifier` when it is returned.
    ///
    /// # Errors
    ///
    /// - [`TryOnError::Validation`] if the form is incomplete; nothing is sent and
    ///   `view` is untouched.
    /// - [`TryOnError::Api`] / [`TryOnError::Reqwest`] for connection failures.
    /// - [`TryOnError::Remote`] when the server reports an error event.
    pub async fn submit<N: Notifier>(
        &mut self,
        form: &TryOnForm,
        view: &mut ResultView,
        notifier: &mut N,
    ) -> Result<Option<String>, TryOnError> {
        self.state = SubmissionState::Validating;
        let Some((image, clothing_id)) = form.complete() else {
            self.state = SubmissionState::Idle;
            notifier.alert(VALIDATION_MESSAGE);
            return Err(TryOnError::Validation(VALIDATION_MESSAGE.into()));
        };

        view.progress.reset();
        view.result.hide();
        notifier.render(view);

        self.state = SubmissionState::Sending;
        tracing::info!(clothing_id, file = %image.file_name, "submitting try-on");
        let client = self.client;
        let stream = match client.tryon().create(image, clothing_id).await {
            Ok(stream) => stream,
            Err(e) => return Err(self.connection_failed(e, view, notifier)),
        };

        self.follow(stream, view, notifier).await
    }

    /// Reads an already-accepted progress stream to its end, applying each event.
    ///
    /// Same results as [`Submitter::submit`] after the upload succeeded: a result
    /// image, `None` when the stream ends without one, or the error that was shown.
    ///
    /// # Errors
    ///
    /// - [`TryOnError::Reqwest`] if the connection breaks before a terminal event.
    /// - [`TryOnError::Remote`] when the server reports an error event.
    pub async fn follow<N: Notifier>(
        &mut self,
        mut stream: ProgressStream,
        view: &mut ResultView,
        notifier: &mut N,
    ) -> Result<Option<String>, TryOnError> {
        self.state = SubmissionState::Streaming;
        let mut outcome: Option<Result<String, String>> = None;
        while let Some(next) = stream.next_event().await {
            let event = match next {
                Ok(event) => event,
                Err(e) if self.state.is_terminal() => {
                    tracing::debug!(error = %e, "stream broke after terminal event");
                    break;
                }
                Err(e) => return Err(self.connection_failed(e, view, notifier)),
            };

            if self.state.is_terminal() {
                tracing::debug!(?event, state = ?self.state, "ignoring event after terminal state");
                continue;
            }

            outcome = match &event {
                StreamEvent::Result { image } => Some(Ok(image.clone())),
                StreamEvent::Error { message } => Some(Err(message.clone())),
                StreamEvent::Progress { .. } => None,
            };
            self.state = dispatch(event, &mut view.progress, &mut view.result, notifier);
            notifier.render(view);
        }

        match outcome {
            Some(Ok(image)) => Ok(Some(image)),
            Some(Err(message)) => Err(TryOnError::Remote(message)),
            None => {
                tracing::warn!("progress stream ended without a result");
                Ok(None)
            }
        }
    }

    fn connection_failed<N: Notifier>(
        &mut self,
        error: TryOnError,
        view: &mut ResultView,
        notifier: &mut N,
    ) -> TryOnError {
        self.state = SubmissionState::Failed;
        tracing::warn!(error = %error, "try-on request failed");
        notifier.alert(&format!("Connection error: {error}"));
        view.progress.hide();
        notifier.render(view);
        error
    }
}
