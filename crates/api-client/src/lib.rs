//! Bankops API client - typed access to the back-office REST API.
//!
//! The external banking application exposes a small JSON API (customers,
//! accounts, loans, transactions, expenses, dashboard stats) behind a
//! username/password login that returns a bearer token. This crate wraps
//! that surface so the diagnostic CLI never touches raw JSON by hand.
//!
//! # Architecture
//!
//! - [`BankApiClient`] holds the HTTP client and base URL; it can only reach
//!   the unauthenticated endpoints (`/api/health`, `/api/auth/login`).
//! - [`ApiSession`], returned by [`BankApiClient::login`], carries the bearer
//!   token and owns every authenticated endpoint method. Probes cannot hit a
//!   protected endpoint without logging in first.
//!
//! # Example
//!
//! ```rust,ignore
//! use bankops_api_client::BankApiClient;
//! use secrecy::SecretString;
//!
//! let client = BankApiClient::new("http://localhost:5000", Duration::from_secs(30))?;
//! let session = client.login("admin", &SecretString::from("admin123")).await?;
//! let page = session.transactions(&TransactionQuery::page(1, 5)).await?;
//! println!("{} transactions total", page.pagination.total);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
mod error;
pub mod types;

pub use client::{ApiSession, BankApiClient};
pub use error::ApiClientError;
pub use types::*;
