//! Reviews service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("review target or review not found")]
    NotFound,

    #[error("not authorised, log in again")]
    Unauthorized,

    #[error("reviews request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for ReviewsServiceError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized => Self::Unauthorized,
            ApiError::Status { status: 404, .. } => Self::NotFound,
            error => Self::Api(error),
        }
    }
}
