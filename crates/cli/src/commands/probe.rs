//! Liveness, login, dashboard, and smoke probes.
//!
//! # Usage
//!
//! ```bash
//! # Is the API up?
//! bankops health
//!
//! # Do the configured credentials work?
//! bankops login
//!
//! # What does the dashboard aggregate look like right now?
//! bankops dashboard
//!
//! # End-to-end smoke sequence against a live instance
//! bankops smoke
//! ```

use tracing::info;

use bankops_api_client::{CustomerQuery, TransactionQuery};

use super::{ProbeError, build_client, login_session};
use crate::output::print_json;

/// `GET /api/health` and print the payload.
///
/// # Errors
///
/// Returns an error if the request fails or the payload cannot be rendered.
pub async fn health() -> Result<(), ProbeError> {
    let (config, client) = build_client()?;

    info!(base_url = %config.base_url, "Checking API health");
    let health = client.health().await?;

    if let Some(status) = &health.status {
        info!(status = %status, "API responded");
    }
    print_json(&health)?;
    Ok(())
}

/// Log in and print the session user.
///
/// # Errors
///
/// Returns an error if login fails.
pub async fn login() -> Result<(), ProbeError> {
    let session = login_session().await?;
    print_json(session.user())?;
    Ok(())
}

/// `GET /api/dashboard/stats` and pretty-print whatever came back.
///
/// # Errors
///
/// Returns an error if login or the request fails.
pub async fn dashboard() -> Result<(), ProbeError> {
    let session = login_session().await?;
    let stats = session.dashboard_stats().await?;
    print_json(&stats)?;
    Ok(())
}

/// Page size used by the smoke transaction check.
const SMOKE_PAGE_LIMIT: u32 = 5;

/// End-to-end smoke sequence: health, login, customers, transactions,
/// dashboard. Stops at the first failure.
///
/// # Errors
///
/// Returns an error if any step fails or an assertion does not hold.
pub async fn smoke() -> Result<(), ProbeError> {
    let (config, client) = build_client()?;

    info!(base_url = %config.base_url, "Smoke 1/5: health");
    client.health().await?;

    info!(username = %config.username, "Smoke 2/5: login");
    let session = client.login(&config.username, &config.password).await?;

    info!("Smoke 3/5: customers page 1");
    let customers = session.customers(&CustomerQuery::default()).await?;
    info!(count = customers.customers.len(), "Customers listed");

    info!("Smoke 4/5: transactions page 1");
    let page = session
        .transactions(&TransactionQuery::page(1, SMOKE_PAGE_LIMIT))
        .await?;
    if page.pagination.total < 0 {
        return Err(ProbeError::Assertion(format!(
            "pagination.total must be >= 0, got {}",
            page.pagination.total
        )));
    }
    if page.pagination.page != 1 {
        return Err(ProbeError::Assertion(format!(
            "requested page 1, server reported page {}",
            page.pagination.page
        )));
    }
    info!(
        total = page.pagination.total,
        pages = page.pagination.pages,
        "Transactions paginated"
    );

    info!("Smoke 5/5: dashboard stats");
    let stats = session.dashboard_stats().await?;
    print_json(&stats)?;

    info!("Smoke sequence passed");
    Ok(())
}
