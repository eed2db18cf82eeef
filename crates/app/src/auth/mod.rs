//! Credentials and where they are kept.

mod credentials;
mod errors;
mod store;

pub use credentials::Credentials;
pub use errors::CredentialsError;
pub use store::{CredentialStore, FileCredentialStore, InMemoryCredentialStore, MockCredentialStore};
