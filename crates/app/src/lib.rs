//! ShopSmart client application: REST client, credentials, and the controllers behind each
//! screen.

pub mod api;
pub mod auth;
pub mod config;
pub mod context;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;
