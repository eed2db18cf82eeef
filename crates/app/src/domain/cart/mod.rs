//! Cart

mod controller;
mod errors;
pub mod models;
mod service;

pub use controller::CartController;
pub use errors::CartServiceError;
pub use service::*;
