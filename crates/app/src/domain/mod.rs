//! ShopSmart client domain: services, and the per-screen controllers built on them.

pub mod cart;
mod cancellation;
mod errors;
pub mod notices;
pub mod payments;
pub mod reviews;

pub use errors::ControllerError;
