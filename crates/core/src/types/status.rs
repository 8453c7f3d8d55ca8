//! Status enums for bank entities.
//!
//! The external API serializes these in SCREAMING_SNAKE_CASE (`"SAVINGS"`,
//! `"PAID"`, `"ADMIN"`); the database stores the same strings in text
//! columns, so direct queries go through `Display`/`FromStr` rather than a
//! custom Postgres enum type.

use serde::{Deserialize, Serialize};

/// Account product type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Checking,
    Loan,
    FixedDeposit,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Savings => write!(f, "SAVINGS"),
            Self::Checking => write!(f, "CHECKING"),
            Self::Loan => write!(f, "LOAN"),
            Self::FixedDeposit => write!(f, "FIXED_DEPOSIT"),
        }
    }
}

/// Account lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    #[default]
    Active,
    Frozen,
    Closed,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Frozen => write!(f, "FROZEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Loan lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Active,
    Paid,
    Defaulted,
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Paid => write!(f, "PAID"),
            Self::Defaulted => write!(f, "DEFAULTED"),
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "PAID" => Ok(Self::Paid),
            "DEFAULTED" => Ok(Self::Defaulted),
            _ => Err(format!("invalid loan status: {s}")),
        }
    }
}

/// Back-office user role with different permission levels.
///
/// The database stores roles as TEXT, so direct queries bind
/// `role.to_string()` rather than relying on a custom enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Full access including user management and manual data repairs.
    Admin,
    /// Branch-level access to customers, accounts, and loans.
    Manager,
    /// Counter operations only.
    Teller,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Manager => write!(f, "MANAGER"),
            Self::Teller => write!(f, "TELLER"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "TELLER" => Ok(Self::Teller),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_serde() {
        let json = serde_json::to_string(&AccountType::FixedDeposit).unwrap();
        assert_eq!(json, "\"FIXED_DEPOSIT\"");

        let parsed: AccountType = serde_json::from_str("\"SAVINGS\"").unwrap();
        assert_eq!(parsed, AccountType::Savings);
    }

    #[test]
    fn test_loan_status_roundtrip() {
        for status in [LoanStatus::Active, LoanStatus::Paid, LoanStatus::Defaulted] {
            let parsed: LoanStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_loan_status_from_str_case_insensitive() {
        assert_eq!("paid".parse::<LoanStatus>().unwrap(), LoanStatus::Paid);
        assert!("SETTLED".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn test_user_role_display_matches_wire_format() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, format!("\"{}\"", UserRole::Admin));
    }

    #[test]
    fn test_user_role_from_str() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("teller".parse::<UserRole>().unwrap(), UserRole::Teller);
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_account_status_default() {
        assert_eq!(AccountStatus::default(), AccountStatus::Active);
    }
}
