//! Admin user seeding (direct database write).
//!
//! # Usage
//!
//! ```bash
//! # Create the seed admin (password comes from BANKOPS_SEED_PASSWORD)
//! BANKOPS_SEED_PASSWORD='...' bankops db admin-create -u admin -n "Administrator"
//!
//! # Reset an existing user's password, role, and active flag
//! BANKOPS_SEED_PASSWORD='...' bankops db admin-create -u admin -n "Administrator" --force
//! ```
//!
//! # Environment Variables
//!
//! - `BANKOPS_DATABASE_URL` - `PostgreSQL` connection string for the bank database
//! - `BANKOPS_SEED_PASSWORD` - Password to hash for the user (never passed on argv)
//!
//! This bypasses the API's own registration validation, which is exactly why
//! it exists: it can bootstrap the very first admin on an empty instance.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use bankops_core::{UserId, UserRole};

use crate::config::{ConfigError, DbConfig};
use crate::db::{self, DbError};

/// Minimum seed password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during admin seeding.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database operation failed.
    #[error(transparent)]
    Database(#[from] DbError),

    /// Invalid role string.
    #[error("Invalid role: {0}. Valid roles: ADMIN, MANAGER, TELLER")]
    InvalidRole(String),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Seed password missing or too weak.
    #[error("Invalid seed password: {0}")]
    InvalidPassword(String),

    /// User already exists and `--force` was not given.
    #[error("User already exists with username: {0} (use --force to reset it)")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,
}

/// Create a back-office user, or reset an existing one with `--force`.
///
/// The password is read from `BANKOPS_SEED_PASSWORD` and stored as an
/// Argon2id PHC hash. Returns the user's id.
///
/// # Errors
///
/// Returns an error for invalid input, a duplicate username without
/// `--force`, or any database failure.
pub async fn create_user(
    username: &str,
    name: &str,
    role: &str,
    force: bool,
) -> Result<UserId, AdminError> {
    let role: UserRole = role
        .parse()
        .map_err(|_| AdminError::InvalidRole(role.to_owned()))?;

    validate_username(username)?;

    let password = seed_password_from_env()?;
    let password_hash = hash_password(&password)?;

    let config = DbConfig::from_env()?;
    tracing::info!("Connecting to bank database...");
    let pool = db::connect(&config.database_url).await?;

    let existing = db::find_user_by_username(&pool, username).await?;

    if let Some(existing) = existing {
        if !force {
            return Err(AdminError::UserExists(username.to_owned()));
        }

        tracing::warn!(
            user_id = %existing.id,
            username,
            "User exists; resetting password hash, role, and active flag"
        );
        db::reset_user(&pool, existing.id, &password_hash, role).await?;
        tracing::info!(user_id = %existing.id, role = %role, "User reset");
        return Ok(existing.id);
    }

    tracing::info!(username, role = %role, "Creating user");
    let user_id = db::insert_user(&pool, username, name, &password_hash, role).await?;
    tracing::info!(user_id = %user_id, username, role = %role, "User created");

    Ok(user_id)
}

/// Read and validate the seed password from the environment.
fn seed_password_from_env() -> Result<SecretString, AdminError> {
    let password = std::env::var("BANKOPS_SEED_PASSWORD")
        .map(SecretString::from)
        .map_err(|_| AdminError::InvalidPassword("BANKOPS_SEED_PASSWORD not set".to_owned()))?;

    validate_password(&password)?;
    Ok(password)
}

/// Reject usernames the external login handler would choke on.
fn validate_username(username: &str) -> Result<(), AdminError> {
    if username.is_empty() {
        return Err(AdminError::InvalidUsername("must not be empty".to_owned()));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AdminError::InvalidUsername(
            "must not contain whitespace".to_owned(),
        ));
    }
    Ok(())
}

/// Enforce the minimum password length.
fn validate_password(password: &SecretString) -> Result<(), AdminError> {
    if password.expose_secret().len() < MIN_PASSWORD_LENGTH {
        return Err(AdminError::InvalidPassword(format!(
            "must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &SecretString) -> Result<String, AdminError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AdminError::PasswordHash)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_validate_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("branch.ops-2").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("two words").is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password(&SecretString::from("short")).is_err());
        assert!(validate_password(&SecretString::from("longenough")).is_ok());
    }

    #[test]
    fn test_hash_password_verifies() {
        let password = SecretString::from("correct-horse-battery");
        let hash = hash_password(&password).unwrap();

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(password.expose_secret().as_bytes(), &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong-password", &parsed)
                .is_err()
        );
    }

    #[test]
    fn test_hash_password_unique_salts() {
        let password = SecretString::from("correct-horse-battery");
        let a = hash_password(&password).unwrap();
        let b = hash_password(&password).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::UserExists("admin".to_string());
        assert_eq!(
            err.to_string(),
            "User already exists with username: admin (use --force to reset it)"
        );
    }
}
