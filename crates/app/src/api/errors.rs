//! API client errors.

use thiserror::Error;

use crate::auth::CredentialsError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid API url: {0}")]
    InvalidUrl(String),

    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("not authorised, log in again")]
    Unauthorized,

    #[error("failed to decode response")]
    Decode(#[source] reqwest::Error),

    #[error("failed to encode request body")]
    Encode(#[from] serde_json::Error),

    #[error("credential store failed")]
    Credentials(#[from] CredentialsError),
}

impl ApiError {
    /// HTTP status of a rejected request.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            _ => None,
        }
    }
}
