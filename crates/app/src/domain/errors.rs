//! Controller errors.

use shopsmart::prelude::*;
use thiserror::Error;

use crate::domain::{cart::CartServiceError, reviews::ReviewsServiceError};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Reviews(#[from] ReviewsServiceError),

    #[error(transparent)]
    CartService(#[from] CartServiceError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("no selected items from shop {0}")]
    EmptyCheckout(ShopId),

    #[error("a shipping address is required")]
    MissingAddress,
}
