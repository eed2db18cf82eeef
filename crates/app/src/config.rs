//! Client configuration

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Production API root.
pub const DEFAULT_API_URL: &str = "https://shopsmart.slotinsolutions.com/api/";

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// REST API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    #[arg(long, env = "SHOPSMART_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "SHOPSMART_TIMEOUT_SECS", default_value_t = 60_u64)]
    pub timeout_secs: u64,

    /// Where access and refresh tokens are stored between runs
    #[arg(
        long,
        env = "SHOPSMART_CREDENTIALS",
        default_value = ".shopsmart/credentials.json"
    )]
    pub credentials_path: PathBuf,

    /// ISO currency code prices are quoted in
    #[arg(long, env = "SHOPSMART_CURRENCY", default_value = "INR")]
    pub currency: String,
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Client configuration.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// REST API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
