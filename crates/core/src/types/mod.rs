//! Core types for the bankops toolkit.
//!
//! This module provides type-safe wrappers for the bank's domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::*;
pub use money::Money;
pub use status::*;
