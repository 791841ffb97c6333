use crate::validation::{Field, FieldErrors};
use thiserror::Error;

/// Failures reported by the remote property service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Transport failure or a non-success status
    #[error("{message}")]
    Network { message: String },

    /// The service refused the record; `message` is its own wording
    #[error("{message}")]
    Rejected { message: String },

    /// A success response whose body did not have the expected shape
    #[error("unexpected response from property service: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        ApiError::Network {
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        ApiError::Rejected {
            message: message.into(),
        }
    }

    /// Whether trying the same request again could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode {
                message: err.to_string(),
            }
        } else {
            ApiError::network(err.to_string())
        }
    }
}

/// Why a create, update or delete did not go through
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    /// The draft failed local validation; nothing was sent
    #[error("invalid property: {0}")]
    Invalid(FieldErrors<Field>),

    /// The remote call failed; any optimistic change has been rolled back
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ApiResult<T> = Result<T, ApiError>;
