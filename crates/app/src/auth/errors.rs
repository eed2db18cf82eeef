//! Credential store errors.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("failed to access credentials file")]
    Io(#[from] io::Error),

    #[error("credentials file is malformed")]
    Json(#[from] serde_json::Error),
}
