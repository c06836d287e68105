//! Password hashing.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tokio::task::{JoinError, spawn_blocking};

/// Hash a password into a PHC string.
///
/// # Errors
///
/// Returns an error when hashing fails.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns an error when the stored hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(password_hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(error) => Err(error),
    }
}

/// [`hash_password`] on the blocking pool. Argon2 is too slow for a runtime
/// worker.
///
/// # Errors
///
/// The outer error means the blocking task panicked or was cancelled.
pub async fn hash_password_blocking(
    password: String,
) -> Result<Result<String, password_hash::Error>, JoinError> {
    spawn_blocking(move || hash_password(&password)).await
}

/// [`verify_password`] on the blocking pool.
///
/// # Errors
///
/// The outer error means the blocking task panicked or was cancelled.
pub async fn verify_password_blocking(
    password: String,
    password_hash: String,
) -> Result<Result<bool, password_hash::Error>, JoinError> {
    spawn_blocking(move || verify_password(&password, &password_hash)).await
}
