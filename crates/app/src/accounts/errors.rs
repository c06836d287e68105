//! Accounts service errors.

use argon2::password_hash;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::task::JoinError;

use crate::accounts::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("submitted data is invalid")]
    Validation(ValidationErrors),

    #[error("No account found with this email address.")]
    NoAccount,

    #[error("This account has been deactivated. Please contact support.")]
    AccountDeactivated,

    #[error(
        "Invalid email address or password. Please check your credentials and try again."
    )]
    InvalidCredentials,

    #[error("account or session not found")]
    NotFound,

    #[error("account already exists")]
    AlreadyExists,

    #[error("password hashing failed")]
    Hashing(#[source] password_hash::Error),

    #[error("password hashing task did not complete")]
    Join(#[source] JoinError),

    #[error("session expiry is out of range")]
    Clock(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<ValidationErrors> for AccountsServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<password_hash::Error> for AccountsServiceError {
    fn from(error: password_hash::Error) -> Self {
        Self::Hashing(error)
    }
}

impl From<JoinError> for AccountsServiceError {
    fn from(error: JoinError) -> Self {
        Self::Join(error)
    }
}

impl From<jiff::Error> for AccountsServiceError {
    fn from(error: jiff::Error) -> Self {
        Self::Clock(error)
    }
}

impl From<Error> for AccountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
