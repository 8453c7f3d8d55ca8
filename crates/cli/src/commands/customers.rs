//! Customer listing probe.
//!
//! # Usage
//!
//! ```bash
//! # First page of customers
//! bankops customers
//!
//! # Search, with each customer's accounts
//! bankops customers --search patel --with-accounts
//! ```

use tracing::info;

use bankops_api_client::CustomerQuery;
use bankops_core::CustomerId;

use super::{ProbeError, login_session};
use crate::output::Table;

/// List customers, optionally expanding each one's accounts.
///
/// Account fetches run sequentially, one customer at a time; this is a
/// diagnostic tool, not a load generator.
///
/// # Errors
///
/// Returns an error if login or any request fails.
pub async fn run(
    search: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
    with_accounts: bool,
) -> Result<(), ProbeError> {
    let session = login_session().await?;

    let query = CustomerQuery { search, page, limit };
    let list = session.customers(&query).await?;
    info!(count = list.customers.len(), "Customers fetched");

    let mut table = Table::new(["ID", "NAME", "EMAIL"]);
    for customer in &list.customers {
        table.row([
            customer.id.to_string(),
            customer.name.clone(),
            customer.email.clone().unwrap_or_default(),
        ]);
    }
    table.print();

    if with_accounts {
        for customer in &list.customers {
            print_accounts(&session, customer.id, &customer.name).await?;
        }
    }

    Ok(())
}

/// List one customer's accounts by id.
///
/// # Errors
///
/// Returns an error if login or the request fails.
pub async fn accounts(customer_id: i64) -> Result<(), ProbeError> {
    let session = login_session().await?;
    let customer_id = CustomerId::new(customer_id);
    print_accounts(&session, customer_id, "customer").await
}

async fn print_accounts(
    session: &bankops_api_client::ApiSession,
    customer_id: CustomerId,
    label: &str,
) -> Result<(), ProbeError> {
    let list = session.accounts(customer_id).await?;
    info!(customer = %customer_id, count = list.accounts.len(), "Accounts fetched");

    let mut table = Table::new(["ACCOUNT", "TYPE", "STATUS", "BALANCE"]);
    for account in &list.accounts {
        table.row([
            account.account_number.clone(),
            account.account_type.to_string(),
            account.status.to_string(),
            account.balance.to_string(),
        ]);
    }

    if table.is_empty() {
        info!(customer = %customer_id, "No accounts for {label} {customer_id}");
    } else {
        table.print();
    }
    Ok(())
}
