use thiserror::Error;

use crate::domain::recipe::errors::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("External service timed out")]
    Timeout,

    #[error("Model response rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Whether the failure came from a collaborator outside the process.
    pub fn is_transport(&self) -> bool {
        matches!(self, CoreError::ExternalServiceError(_) | CoreError::Timeout)
    }
}
