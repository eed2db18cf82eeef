//! Cart service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum CartServiceError {
    #[error("product or cart line not found")]
    NotFound,

    #[error("not authorised, log in again")]
    Unauthorized,

    #[error("cart request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for CartServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => Self::Unauthorized,
            ApiError::Status { status: 404, .. } => Self::NotFound,
            error => Self::Api(error),
        }
    }
}
