//! Direct database access for the `db` subcommands.
//!
//! The schema belongs to the external banking application; this module only
//! touches the `users` and `loans` tables, and only for the two operational
//! tasks the back office actually needs: seeding an admin user and repairing
//! PAID loans that still carry an outstanding balance. Queries are
//! runtime-bound (`sqlx::query_as` with binds) because there is no local
//! migrations tree to verify against.

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;

use bankops_core::{LoanId, LoanStatus, Money, UserId, UserRole};

/// Errors from direct database operations.
#[derive(Debug, Error)]
pub enum DbError {
    /// Query or connection failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row holds data this tool cannot interpret.
    #[error("Data corruption: {0}")]
    DataCorruption(String),
}

/// Connect to the bank database.
///
/// The pool is tiny on purpose: every command is a one-shot sequential
/// script and holds at most one connection plus a transaction.
///
/// # Errors
///
/// Returns `DbError::Database` if the connection cannot be established.
pub async fn connect(database_url: &SecretString) -> Result<PgPool, DbError> {
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.expose_secret())
        .await?;
    Ok(pool)
}

// =============================================================================
// Users
// =============================================================================

/// Row shape for the external `users` table.
///
/// `role` stays a string here; the external schema stores it as TEXT and this
/// tool should still print rows it does not fully understand.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
}

impl UserRow {
    /// Parse the stored role string.
    ///
    /// # Errors
    ///
    /// Returns `DbError::DataCorruption` if the role is not one this tool knows.
    pub fn role(&self) -> Result<UserRole, DbError> {
        self.role
            .parse()
            .map_err(|e| DbError::DataCorruption(format!("user {}: {e}", self.id)))
    }
}

/// Look up a user by username.
///
/// # Errors
///
/// Returns `DbError::Database` if the query fails.
pub async fn find_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, name, role, is_active FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert a new back-office user and return its id.
///
/// # Errors
///
/// Returns `DbError::Database` if the insert fails (including unique-key
/// races with a concurrent insert).
pub async fn insert_user(
    pool: &PgPool,
    username: &str,
    name: &str,
    password_hash: &str,
    role: UserRole,
) -> Result<UserId, DbError> {
    let id = sqlx::query_scalar::<_, UserId>(
        r"
        INSERT INTO users (username, name, password, role, is_active)
        VALUES ($1, $2, $3, $4, TRUE)
        RETURNING id
        ",
    )
    .bind(username)
    .bind(name)
    .bind(password_hash)
    .bind(role.to_string())
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Reset an existing user's credentials, role, and active flag.
///
/// This is the upsert half of `db admin-create --force`: the row keeps its
/// id and name, everything used for login is replaced.
///
/// # Errors
///
/// Returns `DbError::Database` if the update fails.
pub async fn reset_user(
    pool: &PgPool,
    user_id: UserId,
    password_hash: &str,
    role: UserRole,
) -> Result<(), DbError> {
    sqlx::query(
        r"
        UPDATE users
        SET password = $2, role = $3, is_active = TRUE, updated_at = NOW()
        WHERE id = $1
        ",
    )
    .bind(user_id)
    .bind(password_hash)
    .bind(role.to_string())
    .execute(pool)
    .await?;

    Ok(())
}

// =============================================================================
// Loans
// =============================================================================

/// Row shape for the external `loans` table, limited to repair-relevant columns.
#[derive(Debug, sqlx::FromRow)]
pub struct LoanRow {
    pub id: LoanId,
    pub account_id: i64,
    pub status: String,
    pub outstanding_balance: Money,
    pub principal_remaining: Money,
    pub is_completed: bool,
}

impl LoanRow {
    /// Parse the stored status string.
    ///
    /// # Errors
    ///
    /// Returns `DbError::DataCorruption` if the status is not one this tool knows.
    pub fn status(&self) -> Result<LoanStatus, DbError> {
        self.status
            .parse()
            .map_err(|e| DbError::DataCorruption(format!("loan {}: {e}", self.id)))
    }
}

const LOAN_COLUMNS: &str =
    "id, account_id, status, outstanding_balance, principal_remaining, is_completed";

/// Find PAID loans that still carry a nonzero outstanding balance.
///
/// # Errors
///
/// Returns `DbError::Database` if the query fails.
pub async fn paid_loans_with_balance(pool: &PgPool) -> Result<Vec<LoanRow>, DbError> {
    let rows = sqlx::query_as::<_, LoanRow>(&format!(
        "SELECT {LOAN_COLUMNS} FROM loans WHERE status = 'PAID' AND outstanding_balance <> 0 ORDER BY id",
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetch a single loan by id.
///
/// # Errors
///
/// Returns `DbError::Database` if the query fails.
pub async fn fetch_loan(pool: &PgPool, loan_id: LoanId) -> Result<Option<LoanRow>, DbError> {
    let row = sqlx::query_as::<_, LoanRow>(&format!("SELECT {LOAN_COLUMNS} FROM loans WHERE id = $1"))
        .bind(loan_id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Outcome of attempting to repair one loan.
#[derive(Debug, PartialEq, Eq)]
pub enum RepairOutcome {
    /// Balance zeroed; carries the balance that was cleared.
    Repaired { previous_balance: Money },
    /// Loan exists but is not PAID; left untouched.
    NotPaid { status: String },
    /// Loan is PAID with a zero balance already; nothing to do.
    AlreadyConsistent,
    /// No loan with that id.
    NotFound,
}

/// Zero the outstanding balance of one PAID loan.
///
/// The row is locked and re-checked inside the transaction, so the update
/// only ever touches a loan that is PAID with a nonzero balance at commit
/// time. Anything else is reported as a no-op outcome.
///
/// # Errors
///
/// Returns `DbError::Database` if any statement in the transaction fails.
pub async fn repair_loan(pool: &PgPool, loan_id: LoanId) -> Result<RepairOutcome, DbError> {
    let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

    let row = sqlx::query_as::<_, LoanRow>(&format!(
        "SELECT {LOAN_COLUMNS} FROM loans WHERE id = $1 FOR UPDATE",
    ))
    .bind(loan_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        return Ok(RepairOutcome::NotFound);
    };

    if row.status.parse::<LoanStatus>() != Ok(LoanStatus::Paid) {
        return Ok(RepairOutcome::NotPaid { status: row.status });
    }

    if row.outstanding_balance.is_zero() {
        return Ok(RepairOutcome::AlreadyConsistent);
    }

    sqlx::query(
        r"
        UPDATE loans
        SET outstanding_balance = 0, principal_remaining = 0, is_completed = TRUE,
            updated_at = NOW()
        WHERE id = $1
        ",
    )
    .bind(loan_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(RepairOutcome::Repaired {
        previous_balance: row.outstanding_balance,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row_role_parse() {
        let row = UserRow {
            id: UserId::new(1),
            username: "admin".to_string(),
            name: "Administrator".to_string(),
            role: "ADMIN".to_string(),
            is_active: true,
        };
        assert_eq!(row.role().unwrap(), UserRole::Admin);
    }

    #[test]
    fn test_user_row_role_corruption() {
        let row = UserRow {
            id: UserId::new(2),
            username: "x".to_string(),
            name: "X".to_string(),
            role: "WIZARD".to_string(),
            is_active: true,
        };
        let err = row.role().unwrap_err();
        assert!(matches!(err, DbError::DataCorruption(_)));
        assert!(err.to_string().contains("user 2"));
    }

    #[test]
    fn test_loan_row_status_parse() {
        let row = LoanRow {
            id: LoanId::new(5),
            account_id: 12,
            status: "PAID".to_string(),
            outstanding_balance: Money::from_units(250),
            principal_remaining: Money::from_units(250),
            is_completed: true,
        };
        assert_eq!(row.status().unwrap(), LoanStatus::Paid);
    }

    #[test]
    fn test_repair_outcome_equality() {
        assert_eq!(
            RepairOutcome::Repaired {
                previous_balance: Money::from_units(250)
            },
            RepairOutcome::Repaired {
                previous_balance: Money::from_units(250)
            }
        );
        assert_ne!(RepairOutcome::NotFound, RepairOutcome::AlreadyConsistent);
    }
}
