//! Wire types for the back-office REST API.
//!
//! These match the JSON the external banking application serves. The server
//! uses camelCase keys and wraps every list in an envelope object
//! (`{"customers": [...]}`), so each endpoint has an envelope type here.
//! Fields the diagnostics do not depend on are optional and defaulted, which
//! keeps the client tolerant of server-side additions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bankops_core::{
    AccountId, AccountStatus, AccountType, CustomerId, ExpenseId, LoanId, LoanStatus, Money,
    TransactionId, UserId, UserRole,
};

// =============================================================================
// Auth
// =============================================================================

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    /// Back-office username.
    pub username: &'a str,
    /// Plaintext password.
    pub password: &'a str,
}

/// Response body for `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: SessionUser,
}

/// The user record returned by login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User id.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Role (ADMIN, MANAGER, TELLER).
    pub role: UserRole,
    /// Whether the account is active.
    #[serde(default = "default_true", rename = "isActive")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

// =============================================================================
// Entities
// =============================================================================

/// A bank customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer id.
    pub id: CustomerId,
    /// Full name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
}

/// A customer account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account id.
    pub id: AccountId,
    /// Human-facing account number.
    pub account_number: String,
    /// Product type.
    pub account_type: AccountType,
    /// Current balance.
    pub balance: Money,
    /// Lifecycle status.
    #[serde(default)]
    pub status: AccountStatus,
    /// Owning customer.
    pub customer_id: CustomerId,
}

/// A loan record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Loan id.
    pub id: LoanId,
    /// Backing loan account.
    pub account_id: AccountId,
    /// Original principal.
    pub principal: Money,
    /// Balance still owed.
    pub outstanding_balance: Money,
    /// Principal portion still owed.
    #[serde(default)]
    pub principal_remaining: Option<Money>,
    /// Total repaid so far.
    #[serde(default)]
    pub total_paid: Option<Money>,
    /// Principal plus interest due over the life of the loan.
    #[serde(default)]
    pub total_payable: Option<Money>,
    /// Lifecycle status.
    pub status: LoanStatus,
    /// Completion flag set by the server when the loan is fully repaid.
    #[serde(default, rename = "isCompleted")]
    pub is_completed: bool,
    /// Accounts pledged as collateral, if any.
    #[serde(default)]
    pub guarantor_account_ids: Vec<AccountId>,
    /// Owning customer.
    pub customer_id: CustomerId,
}

impl Loan {
    /// True if the loan claims to be repaid but still carries a balance.
    ///
    /// This is the invariant violation the back office keeps running into:
    /// a PAID loan must have a zero outstanding balance.
    #[must_use]
    pub fn violates_paid_invariant(&self) -> bool {
        self.status == LoanStatus::Paid && !self.outstanding_balance.is_zero()
    }
}

/// A ledger transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction id.
    pub id: TransactionId,
    /// Name of the customer on the transaction.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Signed amount.
    pub amount: Money,
    /// Account the transaction posted to.
    pub account_id: AccountId,
    /// When the transaction posted.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A back-office expense entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense id.
    pub id: ExpenseId,
    /// What the expense was for.
    pub description: String,
    /// Free-form category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Amount spent.
    pub amount: Money,
}

// =============================================================================
// Envelopes & pagination
// =============================================================================

/// Envelope for `GET /api/customers`.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerList {
    /// Matching customers.
    pub customers: Vec<Customer>,
}

/// Envelope for `GET /api/accounts`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountList {
    /// The customer's accounts.
    pub accounts: Vec<Account>,
}

/// Envelope for `GET /api/loans`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanList {
    /// All loans visible to the session user.
    pub loans: Vec<Loan>,
}

/// Envelope for `GET /api/expenses`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseList {
    /// Matching expenses.
    pub expenses: Vec<Expense>,
}

/// Envelope for `GET /api/transactions`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionPage {
    /// Transactions on this page.
    pub transactions: Vec<Transaction>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

/// Pagination metadata on the transactions endpoint.
///
/// Older server builds return the page count as `totalPages`; newer ones use
/// `pages`. Both deserialize into [`Pagination::pages`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Total matching rows.
    pub total: i64,
    /// Current page (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total page count.
    #[serde(alias = "totalPages")]
    pub pages: u32,
}

// =============================================================================
// Dashboard & health
// =============================================================================

/// Aggregate stats from `GET /api/dashboard/stats`.
///
/// The shape is implementation-defined server-side; the fields the smoke
/// checks care about are typed, everything else is preserved in `extra` so
/// the probe can still print the whole payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Customer count.
    #[serde(default)]
    pub total_customers: Option<i64>,
    /// Account count.
    #[serde(default)]
    pub total_accounts: Option<i64>,
    /// Loan count.
    #[serde(default)]
    pub total_loans: Option<i64>,
    /// Sum of account balances.
    #[serde(default)]
    pub total_balance: Option<Money>,
    /// Fields this client does not model.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Liveness payload from `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Reported status string (commonly `"ok"`).
    #[serde(default)]
    pub status: Option<String>,
    /// Anything else the server includes (uptime, version, db state).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// =============================================================================
// Query parameters
// =============================================================================

/// Query parameters for `GET /api/customers`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerQuery {
    /// Free-text name/email search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Page number (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Query parameters for `GET /api/transactions`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionQuery {
    /// Page number (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free-text search over customer names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl TransactionQuery {
    /// Query for a specific page with a page size.
    #[must_use]
    pub const fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            search: None,
        }
    }
}

/// Query parameters for `GET /api/expenses`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExpenseQuery {
    /// Free-text search over descriptions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Category filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_deserialization() {
        let json = r#"{
            "token": "eyJhbGciOi.abc.def",
            "user": {
                "id": 1,
                "username": "admin",
                "name": "Administrator",
                "role": "ADMIN",
                "isActive": true
            }
        }"#;

        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "eyJhbGciOi.abc.def");
        assert_eq!(resp.user.username, "admin");
        assert_eq!(resp.user.role, UserRole::Admin);
        assert!(resp.user.is_active);
    }

    #[test]
    fn test_session_user_defaults() {
        // name and isActive may be absent on older server builds
        let json = r#"{"id": 2, "username": "teller1", "role": "TELLER"}"#;
        let user: SessionUser = serde_json::from_str(json).unwrap();
        assert!(user.name.is_none());
        assert!(user.is_active);
    }

    #[test]
    fn test_customer_list_envelope() {
        let json = r#"{"customers": [
            {"id": 1, "name": "Asha Patel", "email": "asha@example.com"},
            {"id": 2, "name": "Ben Okafor"}
        ]}"#;

        let list: CustomerList = serde_json::from_str(json).unwrap();
        assert_eq!(list.customers.len(), 2);
        assert_eq!(list.customers[0].email.as_deref(), Some("asha@example.com"));
        assert!(list.customers[1].email.is_none());
    }

    #[test]
    fn test_account_deserialization() {
        let json = r#"{
            "id": 10,
            "accountNumber": "SAV-000010",
            "accountType": "SAVINGS",
            "balance": "1500.75",
            "status": "ACTIVE",
            "customerId": 1
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Savings);
        assert_eq!(account.balance.to_string(), "1500.75");
        assert_eq!(account.customer_id, CustomerId::new(1));
    }

    #[test]
    fn test_loan_paid_invariant() {
        let json = r#"{
            "id": 5,
            "accountId": 12,
            "principal": 10000,
            "outstandingBalance": "250.00",
            "principalRemaining": "250.00",
            "totalPaid": "9750.00",
            "totalPayable": "10000.00",
            "status": "PAID",
            "isCompleted": true,
            "guarantorAccountIds": [3, 4],
            "customerId": 1
        }"#;

        let loan: Loan = serde_json::from_str(json).unwrap();
        assert!(loan.violates_paid_invariant());
        assert_eq!(loan.guarantor_account_ids, vec![AccountId::new(3), AccountId::new(4)]);

        let healthy = Loan {
            outstanding_balance: Money::ZERO,
            ..loan
        };
        assert!(!healthy.violates_paid_invariant());
    }

    #[test]
    fn test_loan_without_guarantors() {
        let json = r#"{
            "id": 6,
            "accountId": 13,
            "principal": "5000",
            "outstandingBalance": "5000",
            "status": "ACTIVE",
            "customerId": 2
        }"#;

        let loan: Loan = serde_json::from_str(json).unwrap();
        assert!(loan.guarantor_account_ids.is_empty());
        assert!(!loan.is_completed);
        assert!(!loan.violates_paid_invariant());
    }

    #[test]
    fn test_pagination_pages_key() {
        let json = r#"{"total": 120, "page": 1, "limit": 5, "pages": 24}"#;
        let p: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(p.pages, 24);
    }

    #[test]
    fn test_pagination_total_pages_alias() {
        let json = r#"{"total": 120, "page": 2, "limit": 5, "totalPages": 24}"#;
        let p: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(p.pages, 24);
        assert_eq!(p.page, 2);
    }

    #[test]
    fn test_transaction_page_envelope() {
        let json = r#"{
            "transactions": [
                {"id": 1, "customerName": "Asha Patel", "amount": "-42.10", "accountId": 10},
                {"id": 2, "amount": 100, "accountId": 10, "createdAt": "2026-08-01T09:30:00Z"}
            ],
            "pagination": {"total": 2, "page": 1, "limit": 5, "totalPages": 1}
        }"#;

        let page: TransactionPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.transactions.len(), 2);
        assert!(page.transactions[0].amount.is_negative());
        assert!(page.transactions[1].created_at.is_some());
        assert_eq!(page.pagination.total, 2);
    }

    #[test]
    fn test_dashboard_stats_keeps_unknown_fields() {
        let json = r#"{
            "totalCustomers": 40,
            "totalBalance": "250000.00",
            "activeLoans": 12,
            "monthlyVolume": {"2026-08": "9000.00"}
        }"#;

        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_customers, Some(40));
        assert!(stats.total_loans.is_none());
        assert!(stats.extra.contains_key("activeLoans"));
        assert!(stats.extra.contains_key("monthlyVolume"));
    }

    #[test]
    fn test_health_payload() {
        let json = r#"{"status": "ok", "uptime": 12345, "database": "connected"}"#;
        let health: Health = serde_json::from_str(json).unwrap();
        assert_eq!(health.status.as_deref(), Some("ok"));
        assert_eq!(health.extra.len(), 2);
    }

    #[test]
    fn test_customer_query_skips_unset_params() {
        let query = CustomerQuery {
            search: Some("patel".to_string()),
            ..CustomerQuery::default()
        };
        let encoded = serde_urlencoded_check(&query);
        assert_eq!(encoded, "search=patel");
    }

    #[test]
    fn test_transaction_query_page_helper() {
        let query = TransactionQuery::page(1, 5);
        let encoded = serde_urlencoded_check(&query);
        assert_eq!(encoded, "page=1&limit=5");
    }

    #[test]
    fn test_expense_query_category() {
        let query = ExpenseQuery {
            search: None,
            category: Some("utilities".to_string()),
        };
        let encoded = serde_urlencoded_check(&query);
        assert_eq!(encoded, "category=utilities");
    }

    /// Encode query params the same way reqwest's `.query()` does.
    fn serde_urlencoded_check<T: Serialize>(query: &T) -> String {
        serde_urlencoded::to_string(query).unwrap()
    }
}
