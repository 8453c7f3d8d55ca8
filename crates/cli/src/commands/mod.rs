//! Command implementations for the `bankops` binary.
//!
//! API probes (`health`, `login`, `customers`, `accounts`, `loans`,
//! `transactions`, `expenses`, `dashboard`, `smoke`) share the login plumbing
//! and [`ProbeError`] here; the `db` commands (`admin.rs`, `repair.rs`) carry
//! their own error types because they fail in database-shaped ways.

pub mod admin;
pub mod customers;
pub mod expenses;
pub mod loans;
pub mod probe;
pub mod repair;
pub mod transactions;

use thiserror::Error;

use bankops_api_client::{ApiClientError, ApiSession, BankApiClient};

use crate::config::{ApiConfig, ConfigError};

/// Errors from the API probe commands.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiClientError),

    /// A payload could not be rendered.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    /// A smoke-check assertion did not hold.
    #[error("Smoke check failed: {0}")]
    Assertion(String),
}

/// Build a client from the environment config.
pub(crate) fn build_client() -> Result<(ApiConfig, BankApiClient), ProbeError> {
    let config = ApiConfig::from_env()?;
    let client = BankApiClient::new(&config.base_url, config.http_timeout)?;
    Ok((config, client))
}

/// Build a client and log in with the configured credentials.
pub(crate) async fn login_session() -> Result<ApiSession, ProbeError> {
    let (config, client) = build_client()?;

    tracing::info!(base_url = %config.base_url, username = %config.username, "Logging in");
    let session = client.login(&config.username, &config.password).await?;
    tracing::info!(user = %session.user().username, role = %session.user().role, "Authenticated");

    Ok(session)
}
