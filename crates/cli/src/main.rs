//! Bankops CLI - diagnostics and seeding tools for the banking back office.
//!
//! # Usage
//!
//! ```bash
//! # API probes (login handled via BANKOPS_USERNAME/BANKOPS_PASSWORD)
//! bankops health
//! bankops smoke
//! bankops customers --search patel --with-accounts
//! bankops transactions --page 1 --limit 5
//! bankops loans --status paid
//!
//! # Direct database operations
//! bankops db admin-create -u admin -n "Administrator" -r ADMIN
//! bankops db loan-audit
//! bankops db loan-repair --all --apply
//! ```
//!
//! # Commands
//!
//! - `health` / `login` / `dashboard` / `smoke` - API liveness and auth probes
//! - `customers` / `accounts` / `loans` / `transactions` / `expenses` - listings
//! - `db admin-create` - Seed or reset a back-office user
//! - `db loan-audit` / `db loan-repair` - Find and fix PAID loans with a balance

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bankops_core::LoanStatus;

mod commands;
mod config;
mod db;
mod output;

#[derive(Parser)]
#[command(name = "bankops")]
#[command(version, about = "Banking back-office diagnostics and seeding tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API liveness (GET /api/health)
    Health,
    /// Log in with the configured credentials and print the session user
    Login,
    /// List customers
    Customers {
        /// Free-text name/email search
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,

        /// Also fetch and print each customer's accounts
        #[arg(long)]
        with_accounts: bool,
    },
    /// List one customer's accounts
    Accounts {
        /// Customer id
        #[arg(long)]
        customer_id: i64,
    },
    /// List loans with an aggregate summary
    Loans {
        /// Only show loans with this status (active, paid, defaulted)
        #[arg(long)]
        status: Option<LoanStatus>,
    },
    /// List transactions with pagination
    Transactions {
        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,

        /// Free-text search over customer names
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List back-office expenses
    Expenses {
        /// Free-text search over descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Category filter
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Print the dashboard stats aggregate
    Dashboard,
    /// Run the end-to-end smoke sequence
    Smoke,
    /// Direct database operations (bypass the API)
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Create or reset a back-office user (password from BANKOPS_SEED_PASSWORD)
    AdminCreate {
        /// Login username
        #[arg(short, long)]
        username: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (ADMIN, MANAGER, TELLER)
        #[arg(short, long, default_value = "ADMIN")]
        role: String,

        /// Reset the password, role, and active flag if the user exists
        #[arg(long)]
        force: bool,
    },
    /// Report PAID loans with a nonzero outstanding balance (read-only)
    LoanAudit,
    /// Zero the outstanding balance of PAID loans (dry run without --apply)
    LoanRepair {
        /// Repair a single loan by id
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        loan_id: Option<i64>,

        /// Repair every violating loan
        #[arg(long)]
        all: bool,

        /// Actually write; the default is a dry run
        #[arg(long)]
        apply: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Health => commands::probe::health().await?,
        Commands::Login => commands::probe::login().await?,
        Commands::Customers {
            search,
            page,
            limit,
            with_accounts,
        } => commands::customers::run(search, page, limit, with_accounts).await?,
        Commands::Accounts { customer_id } => commands::customers::accounts(customer_id).await?,
        Commands::Loans { status } => commands::loans::run(status).await?,
        Commands::Transactions { page, limit, search } => {
            commands::transactions::run(page, limit, search).await?;
        }
        Commands::Expenses { search, category } => {
            commands::expenses::run(search, category).await?;
        }
        Commands::Dashboard => commands::probe::dashboard().await?,
        Commands::Smoke => commands::probe::smoke().await?,
        Commands::Db { action } => match action {
            DbAction::AdminCreate {
                username,
                name,
                role,
                force,
            } => {
                commands::admin::create_user(&username, &name, &role, force).await?;
            }
            DbAction::LoanAudit => commands::repair::audit().await?,
            DbAction::LoanRepair { loan_id, all: _, apply } => {
                commands::repair::repair(loan_id, apply).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_health() {
        let cli = Cli::try_parse_from(["bankops", "health"]).unwrap();
        assert!(matches!(cli.command, Commands::Health));
    }

    #[test]
    fn test_parse_customers_flags() {
        let cli = Cli::try_parse_from([
            "bankops",
            "customers",
            "--search",
            "patel",
            "--page",
            "2",
            "--with-accounts",
        ])
        .unwrap();

        match cli.command {
            Commands::Customers {
                search,
                page,
                limit,
                with_accounts,
            } => {
                assert_eq!(search.as_deref(), Some("patel"));
                assert_eq!(page, Some(2));
                assert_eq!(limit, None);
                assert!(with_accounts);
            }
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn test_parse_loans_status() {
        let cli = Cli::try_parse_from(["bankops", "loans", "--status", "paid"]).unwrap();
        match cli.command {
            Commands::Loans { status } => assert_eq!(status, Some(LoanStatus::Paid)),
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn test_parse_loans_bad_status() {
        assert!(Cli::try_parse_from(["bankops", "loans", "--status", "settled"]).is_err());
    }

    #[test]
    fn test_parse_admin_create_default_role() {
        let cli = Cli::try_parse_from([
            "bankops",
            "db",
            "admin-create",
            "-u",
            "admin",
            "-n",
            "Administrator",
        ])
        .unwrap();

        match cli.command {
            Commands::Db {
                action: DbAction::AdminCreate { role, force, .. },
            } => {
                assert_eq!(role, "ADMIN");
                assert!(!force);
            }
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn test_loan_repair_requires_target() {
        assert!(Cli::try_parse_from(["bankops", "db", "loan-repair"]).is_err());
    }

    #[test]
    fn test_loan_repair_rejects_both_targets() {
        assert!(
            Cli::try_parse_from(["bankops", "db", "loan-repair", "--loan-id", "5", "--all"])
                .is_err()
        );
    }

    #[test]
    fn test_loan_repair_all_dry_run() {
        let cli = Cli::try_parse_from(["bankops", "db", "loan-repair", "--all"]).unwrap();
        match cli.command {
            Commands::Db {
                action: DbAction::LoanRepair { loan_id, all, apply },
            } => {
                assert_eq!(loan_id, None);
                assert!(all);
                assert!(!apply);
            }
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn test_parse_transactions_short_flags() {
        let cli =
            Cli::try_parse_from(["bankops", "transactions", "-p", "1", "-l", "5"]).unwrap();
        match cli.command {
            Commands::Transactions { page, limit, search } => {
                assert_eq!(page, Some(1));
                assert_eq!(limit, Some(5));
                assert_eq!(search, None);
            }
            _ => panic!("parsed wrong command"),
        }
    }
}
