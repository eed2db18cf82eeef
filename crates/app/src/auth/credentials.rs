//! Bearer credentials.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Access token plus the refresh token used to renew it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    access: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: Option<String>) -> Self {
        Self {
            access: access.into(),
            refresh,
        }
    }

    #[must_use]
    pub fn access(&self) -> &str {
        &self.access
    }

    #[must_use]
    pub fn refresh(&self) -> Option<&str> {
        self.refresh.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access", &"**redacted**")
            .field("refresh", &self.refresh.as_ref().map(|_| "**redacted**"))
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.access.zeroize();

        if let Some(refresh) = self.refresh.as_mut() {
            refresh.zeroize();
        }
    }
}
