use serde::{Deserialize, Serialize};

/// Body for `POST /api/feedback`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// User rating of the result
    pub score: u8,
    /// Free-form comment
    pub comment: String,
}

impl Feedback {
    /// Creates a feedback entry
    #[must_use]
    pub fn new(score: u8, comment: impl Into<String>) -> Self {
        Self {
            score,
            comment: comment.into(),
        }
    }
}

/// Response from `POST /api/feedback`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    /// `"success"` when the entry was recorded
    pub status: String,
}
