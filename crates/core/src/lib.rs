//! Bankops Core - Shared types library.
//!
//! This crate provides common domain types used across the bankops toolkit:
//! - `api-client` - Typed client for the back-office REST API
//! - `cli` - The `bankops` diagnostic and seeding binary
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, and status enums for bank entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
