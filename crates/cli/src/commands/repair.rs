//! Loan balance audit and repair (direct database writes).
//!
//! # Usage
//!
//! ```bash
//! # Read-only: which PAID loans still carry a balance?
//! bankops db loan-audit
//!
//! # Dry run against one loan
//! bankops db loan-repair --loan-id 5
//!
//! # Actually zero every violating loan
//! bankops db loan-repair --all --apply
//! ```
//!
//! The repair exists because the external system sometimes marks a loan PAID
//! without zeroing its outstanding balance. It is deliberately narrow: dry
//! run unless `--apply`, and the write re-checks status and balance under a
//! row lock so it can never blank a loan that is healthy or still active.

use thiserror::Error;
use tracing::{info, warn};

use bankops_core::LoanId;

use crate::config::{ConfigError, DbConfig};
use crate::db::{self, DbError, LoanRow, RepairOutcome};
use crate::output::Table;

/// Errors from the loan audit/repair commands.
#[derive(Debug, Error)]
pub enum RepairError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database operation failed.
    #[error(transparent)]
    Database(#[from] DbError),

    /// The requested loan does not exist.
    #[error("Loan not found: {0}")]
    LoanNotFound(LoanId),
}

/// Report PAID loans with a nonzero outstanding balance. Read-only.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or queried.
pub async fn audit() -> Result<(), RepairError> {
    let config = DbConfig::from_env()?;
    let pool = db::connect(&config.database_url).await?;

    let violations = db::paid_loans_with_balance(&pool).await?;
    print_violations(&violations);

    if violations.is_empty() {
        info!("All PAID loans have a zero outstanding balance");
    } else {
        warn!(count = violations.len(), "PAID loans with a nonzero balance");
    }

    Ok(())
}

/// Repair one loan or every violating loan. Dry run unless `apply` is set.
///
/// # Errors
///
/// Returns an error if the target loan does not exist or the database fails.
pub async fn repair(loan_id: Option<i64>, apply: bool) -> Result<(), RepairError> {
    let config = DbConfig::from_env()?;
    let pool = db::connect(&config.database_url).await?;

    let targets: Vec<LoanRow> = match loan_id {
        Some(id) => {
            let id = LoanId::new(id);
            let row = db::fetch_loan(&pool, id)
                .await?
                .ok_or(RepairError::LoanNotFound(id))?;
            vec![row]
        }
        None => db::paid_loans_with_balance(&pool).await?,
    };

    if targets.is_empty() {
        info!("Nothing to repair: all PAID loans have a zero outstanding balance");
        return Ok(());
    }

    print_violations(&targets);

    if !apply {
        info!(
            count = targets.len(),
            "Dry run; re-run with --apply to zero these balances"
        );
        return Ok(());
    }

    let mut repaired = 0usize;
    let mut skipped = 0usize;
    for target in &targets {
        match db::repair_loan(&pool, target.id).await? {
            RepairOutcome::Repaired { previous_balance } => {
                repaired += 1;
                warn!(
                    loan = %target.id,
                    previous_balance = %previous_balance,
                    "Outstanding balance zeroed"
                );
            }
            RepairOutcome::NotPaid { status } => {
                skipped += 1;
                warn!(loan = %target.id, status = %status, "Skipped: loan is not PAID");
            }
            RepairOutcome::AlreadyConsistent => {
                skipped += 1;
                info!(loan = %target.id, "Skipped: already consistent");
            }
            RepairOutcome::NotFound => {
                skipped += 1;
                warn!(loan = %target.id, "Skipped: loan disappeared mid-run");
            }
        }
    }

    info!(repaired, skipped, "Repair complete");
    Ok(())
}

fn print_violations(rows: &[LoanRow]) {
    let mut table = Table::new(["LOAN", "ACCOUNT", "STATUS", "OUTSTANDING", "COMPLETED"]);
    for row in rows {
        table.row([
            row.id.to_string(),
            row.account_id.to_string(),
            row.status.clone(),
            row.outstanding_balance.to_string(),
            if row.is_completed { "yes" } else { "no" }.to_string(),
        ]);
    }
    table.print();
}
