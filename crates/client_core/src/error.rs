//! Transport errors and the per-operation outcomes the state machine reacts to.

use chrono::{DateTime, Utc};
use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend rejected request: {0}")]
    Api(#[from] ApiError),
    #[error("malformed backend response: {0}")]
    Decode(String),
    #[error("no credential available for this request")]
    MissingCredential,
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
}

impl BackendError {
    pub fn is_auth_rejection(&self) -> bool {
        match self {
            BackendError::Api(api) => api.is_auth_rejection(),
            BackendError::MissingCredential => true,
            _ => false,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            BackendError::Api(api) => Some(api.code),
            BackendError::MissingCredential => Some(ErrorCode::Unauthorized),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("backend unreachable: {reason}")]
pub struct Unreachable {
    pub reason: String,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no active session")]
pub struct NoSession;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
    /// Set when the backend accepted the credentials but the session had to
    /// be rolled back, which also discards any credential held before.
    pub credential_dropped: bool,
    #[source]
    pub source: BackendError,
}

#[derive(Debug, Error)]
#[error("failed to load recipes: {source}")]
pub struct LoadFailure {
    #[from]
    pub source: BackendError,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct CreateFailure {
    pub message: String,
    pub code: Option<ErrorCode>,
    #[source]
    pub source: BackendError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title and photo are required: the title is empty.")]
    EmptyTitle,
    #[error("Title and photo are required: no photo was attached.")]
    MissingPhoto,
}
