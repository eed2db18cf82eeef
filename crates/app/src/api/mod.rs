//! ShopSmart REST API client.

mod client;
mod errors;
pub mod records;

pub use client::{ApiClient, REFRESH_PATH, REQUEST_ID_HEADER};
pub use errors::ApiError;
