use shared::{domain::FieldName, error::ErrorCode};
use thiserror::Error;

use crate::controller::SubmissionPhase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("form has invalid input (first invalid field: {first_invalid:?})")]
    Invalid { first_invalid: Option<FieldName> },
    #[error("form-intake endpoint is not configured")]
    NotConfigured,
    #[error("submission failed: {0}")]
    Transport(String),
    #[error("cannot submit while the form is {0:?}")]
    Unavailable(SubmissionPhase),
}

impl SubmitError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmitError::Invalid { .. } | SubmitError::Unavailable(_) => ErrorCode::Validation,
            SubmitError::NotConfigured => ErrorCode::Configuration,
            SubmitError::Transport(_) => ErrorCode::Transport,
        }
    }

    /// Only transport failures are worth another attempt with the same input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Transport(_))
    }
}
