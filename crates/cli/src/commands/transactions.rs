//! Transaction listing probe.
//!
//! # Usage
//!
//! ```bash
//! # First five transactions
//! bankops transactions --page 1 --limit 5
//!
//! # Search by customer name
//! bankops transactions --search patel
//! ```

use tracing::info;

use bankops_api_client::TransactionQuery;

use super::{ProbeError, login_session};
use crate::output::Table;

/// Paginated transaction listing with optional free-text search.
///
/// # Errors
///
/// Returns an error if login or the request fails.
pub async fn run(
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
) -> Result<(), ProbeError> {
    let session = login_session().await?;

    let query = TransactionQuery { page, limit, search };
    let result = session.transactions(&query).await?;

    let mut table = Table::new(["ID", "CUSTOMER", "ACCOUNT", "AMOUNT", "POSTED"]);
    for tx in &result.transactions {
        table.row([
            tx.id.to_string(),
            tx.customer_name.clone().unwrap_or_default(),
            tx.account_id.to_string(),
            tx.amount.to_string(),
            tx.created_at.map_or_else(String::new, |t| t.to_rfc3339()),
        ]);
    }
    table.print();

    let p = &result.pagination;
    info!(
        total = p.total,
        page = p.page,
        limit = p.limit,
        pages = p.pages,
        "Pagination"
    );

    Ok(())
}
