use thiserror::Error;

/// Errors surfaced by the quiz engine and its loaders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Dataset, dictionary or map image could not be loaded. Fatal, never retried.
    #[error("{what} unavailable: {reason}")]
    DataUnavailable { what: String, reason: String },

    /// The store holds no entities, so there is nothing to quiz on.
    #[error("dataset contains no entities")]
    EmptyCollection,

    /// Empty or whitespace-only answers are rejected before evaluation.
    #[error("answer is empty")]
    EmptySubmission,

    /// Input arrived while the current answer is being revealed.
    #[error("input is locked until the next question")]
    InputLocked,
}

impl QuizError {
    pub fn data_unavailable(what: impl Into<String>, reason: impl ToString) -> Self {
        QuizError::DataUnavailable {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error ends the session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            QuizError::DataUnavailable { .. } | QuizError::EmptyCollection
        )
    }
}

pub type QuizResult<T> = Result<T, QuizError>;
