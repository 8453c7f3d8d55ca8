//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## API commands
//! - `BANKOPS_API_BASE_URL` - Base URL of the back-office API (default: `http://localhost:5000`)
//! - `BANKOPS_USERNAME` - Login username (default: `admin`, the seeded back-office user)
//! - `BANKOPS_PASSWORD` - Login password (default: `admin123`, the seeded credential)
//! - `BANKOPS_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)
//!
//! ## Database commands
//! - `BANKOPS_DATABASE_URL` - `PostgreSQL` connection string for the bank database
//! - `BANKOPS_SEED_PASSWORD` - Password for `db admin-create` (env only, never argv)
//!
//! The defaults match the dev instances these diagnostics are pointed at;
//! production use always sets the variables explicitly.

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Default API base URL for local dev instances.
const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

/// Default login, matching the external system's seed user.
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin123";

/// Default per-request timeout in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Configuration for commands that talk to the REST API.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the back-office API.
    pub base_url: String,
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: SecretString,
    /// Per-request timeout.
    pub http_timeout: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Load API configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the timeout is not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let http_timeout = parse_timeout_secs(
            "BANKOPS_HTTP_TIMEOUT_SECS",
            get_env_or_default("BANKOPS_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS.to_string()),
        )?;

        Ok(Self {
            base_url: get_env_or_default("BANKOPS_API_BASE_URL", DEFAULT_API_BASE_URL.to_string()),
            username: get_env_or_default("BANKOPS_USERNAME", DEFAULT_USERNAME.to_string()),
            password: SecretString::from(get_env_or_default(
                "BANKOPS_PASSWORD",
                DEFAULT_PASSWORD.to_string(),
            )),
            http_timeout,
        })
    }
}

/// Configuration for commands that go straight to the database.
#[derive(Clone)]
pub struct DbConfig {
    /// `PostgreSQL` connection string (contains the password).
    pub database_url: SecretString,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("database_url", &"[REDACTED]")
            .finish()
    }
}

impl DbConfig {
    /// Load database configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `BANKOPS_DATABASE_URL` is not
    /// set; there is no safe default for a connection string.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("BANKOPS_DATABASE_URL")?;
        Ok(Self { database_url })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Get the database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &'static str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key))
}

/// Parse a timeout value in whole seconds.
fn parse_timeout_secs(key: &'static str, value: String) -> Result<Duration, ConfigError> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key, e.to_string()))
}
