//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::carts::rules::CartRuleViolation;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item already exists")]
    AlreadyExists,

    #[error("cart, item, product or variant not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("only {available} items available in stock")]
    InsufficientStock { available: u32 },

    #[error("maximum order quantity is {max}")]
    QuantityExceedsLimit { max: u32 },

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<CartRuleViolation> for CartsServiceError {
    fn from(violation: CartRuleViolation) -> Self {
        match violation {
            CartRuleViolation::InvalidQuantity => Self::InvalidQuantity,
            CartRuleViolation::InsufficientStock { available } => {
                Self::InsufficientStock { available }
            }
            CartRuleViolation::QuantityExceedsLimit { max } => Self::QuantityExceedsLimit { max },
        }
    }
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
