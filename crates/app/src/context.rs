//! App Context

use std::{fmt, sync::Arc};

use rusty_money::iso::Currency;
use shopsmart::prelude::*;
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiError},
    auth::{CredentialStore, FileCredentialStore},
    config::ApiConfig,
    domain::{
        cart::{CartController, CartService, HttpCartService},
        payments::SavedCards,
        reviews::{HttpReviewsService, ReviewsController, ReviewsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("unsupported currency")]
    Currency(#[from] PriceError),

    #[error("failed to build API client")]
    Api(#[from] ApiError),
}

/// Services and owned client state shared by every screen.
pub struct AppContext {
    pub reviews: Arc<dyn ReviewsService>,
    pub cart: Arc<dyn CartService>,
    pub credentials: Arc<dyn CredentialStore>,
    pub currency: &'static Currency,
    pub saved_cards: SavedCards,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("currency", &self.currency.iso_alpha_code)
            .field("saved_cards", &self.saved_cards)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build the context from configuration, keeping credentials in the configured file.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency or an unusable API URL.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppInitError> {
        let credentials = Arc::new(FileCredentialStore::new(&config.credentials_path));

        Self::with_credentials(config, credentials)
    }

    /// Build the context around an existing credential store.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency or an unusable API URL.
    pub fn with_credentials(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, AppInitError> {
        let currency = parse_currency(&config.currency)?;
        let client = ApiClient::new(&config.api_url, config.timeout(), credentials.clone())?;

        Ok(Self {
            reviews: Arc::new(HttpReviewsService::new(client.clone())),
            cart: Arc::new(HttpCartService::new(client)),
            credentials,
            currency,
            saved_cards: SavedCards::default(),
        })
    }

    /// Controller for one product's or shop's review screen.
    #[must_use]
    pub fn reviews_controller(&self, target: ReviewTarget) -> ReviewsController {
        ReviewsController::new(target, self.reviews.clone())
    }

    /// Controller for the cart screen.
    #[must_use]
    pub fn cart_controller(&self) -> CartController {
        CartController::new(self.cart.clone(), self.currency)
    }
}
