//! Credential stores.

use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::debug;
use zeroize::Zeroize;

use crate::auth::{Credentials, CredentialsError};

/// Credentials in memory, lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<Option<Credentials>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new(credentials: Option<Credentials>) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        Ok(self.credentials.read().await.clone())
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError> {
        *self.credentials.write().await = Some(credentials.clone());

        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        *self.credentials.write().await = None;

        Ok(())
    }
}

/// Credentials persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        let mut bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        let parsed = serde_json::from_slice(&bytes);

        bytes.zeroize();

        Ok(Some(parsed?))
    }

    async fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut bytes = serde_json::to_vec_pretty(credentials)?;
        let written = write_owner_only(&self.path, &bytes).await;

        bytes.zeroize();
        written?;

        debug!(path = %self.path.display(), "saved credentials");

        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Write `bytes` to `path`, readable and writable by the owner only on unix.
async fn write_owner_only(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;

    // `mode` only applies on creation; tighten files written by older versions too.
    #[cfg(unix)]
    {
        use std::{fs::Permissions, os::unix::fs::PermissionsExt};

        file.set_permissions(Permissions::from_mode(0o600)).await?;
    }

    file.write_all(bytes).await?;
    file.flush().await
}

#[automock]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored credentials, if any.
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError>;

    /// Replace the stored credentials.
    async fn save(&self, credentials: &Credentials) -> Result<(), CredentialsError>;

    /// Forget the stored credentials.
    async fn clear(&self) -> Result<(), CredentialsError>;
}
