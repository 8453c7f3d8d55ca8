//! Loan listing probe (API side, read-only).
//!
//! # Usage
//!
//! ```bash
//! # All loans with a summary line
//! bankops loans
//!
//! # Only PAID loans
//! bankops loans --status paid
//! ```
//!
//! Any PAID loan still carrying an outstanding balance is reported here as
//! an observation; fixing it is `bankops db loan-repair`'s job.

use tracing::{info, warn};

use bankops_core::{LoanStatus, Money};

use super::{ProbeError, login_session};
use crate::output::Table;

/// List loans with an optional client-side status filter.
///
/// The API has no status query parameter, so filtering happens here after
/// the fetch.
///
/// # Errors
///
/// Returns an error if login or the request fails.
pub async fn run(status: Option<LoanStatus>) -> Result<(), ProbeError> {
    let session = login_session().await?;

    let list = session.loans().await?;
    let loans: Vec<_> = list
        .loans
        .into_iter()
        .filter(|loan| status.is_none_or(|s| loan.status == s))
        .collect();

    let mut table = Table::new([
        "ID",
        "ACCOUNT",
        "CUSTOMER",
        "STATUS",
        "PRINCIPAL",
        "OUTSTANDING",
        "COMPLETED",
        "GUARANTORS",
    ]);
    let mut total_outstanding = Money::ZERO;
    for loan in &loans {
        total_outstanding += loan.outstanding_balance;
        table.row([
            loan.id.to_string(),
            loan.account_id.to_string(),
            loan.customer_id.to_string(),
            loan.status.to_string(),
            loan.principal.to_string(),
            loan.outstanding_balance.to_string(),
            if loan.is_completed { "yes" } else { "no" }.to_string(),
            loan.guarantor_account_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(","),
        ]);
    }
    table.print();

    info!(
        count = loans.len(),
        total_outstanding = %total_outstanding,
        "Loans listed"
    );

    let violations: Vec<_> = loans.iter().filter(|l| l.violates_paid_invariant()).collect();
    for loan in &violations {
        warn!(
            loan = %loan.id,
            outstanding = %loan.outstanding_balance,
            "PAID loan still carries a balance; see `bankops db loan-repair`"
        );
    }
    if violations.is_empty() {
        info!("No PAID loans with a nonzero balance");
    }

    Ok(())
}
