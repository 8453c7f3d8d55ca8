//! Expense listing probe.
//!
//! # Usage
//!
//! ```bash
//! bankops expenses
//! bankops expenses --category utilities
//! bankops expenses --search "generator fuel"
//! ```

use tracing::info;

use bankops_api_client::ExpenseQuery;
use bankops_core::Money;

use super::{ProbeError, login_session};
use crate::output::Table;

/// List expenses with optional search and category filters.
///
/// # Errors
///
/// Returns an error if login or the request fails.
pub async fn run(search: Option<String>, category: Option<String>) -> Result<(), ProbeError> {
    let session = login_session().await?;

    let query = ExpenseQuery { search, category };
    let list = session.expenses(&query).await?;

    let mut table = Table::new(["ID", "CATEGORY", "DESCRIPTION", "AMOUNT"]);
    let mut total = Money::ZERO;
    for expense in &list.expenses {
        total += expense.amount;
        table.row([
            expense.id.to_string(),
            expense.category.clone().unwrap_or_default(),
            expense.description.clone(),
            expense.amount.to_string(),
        ]);
    }
    table.print();

    info!(count = list.expenses.len(), total = %total, "Expenses listed");
    Ok(())
}
