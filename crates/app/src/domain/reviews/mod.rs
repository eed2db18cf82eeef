//! Reviews

mod controller;
mod errors;
mod service;

pub use controller::{DraftPolicy, LoadStatus, ReviewsController};
pub use errors::ReviewsServiceError;
pub use service::*;
