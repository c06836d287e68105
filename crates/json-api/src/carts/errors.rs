//! Cart Errors

use salvo::http::StatusCode;
use tracing::{error, warn};

use storefront_app::domain::carts::CartsServiceError;

use crate::{
    errors::{ApiError, GENERIC_FAILURE_MESSAGE},
    observability::{CartMutation, record_cart_mutation},
};

/// Metrics label for the outcome of a cart mutation.
fn outcome(error: &CartsServiceError) -> &'static str {
    match error {
        CartsServiceError::InvalidQuantity => "invalid_quantity",
        CartsServiceError::InsufficientStock { .. } => "insufficient_stock",
        CartsServiceError::QuantityExceedsLimit { .. } => "quantity_exceeds_limit",
        CartsServiceError::NotFound => "not_found",
        CartsServiceError::AlreadyExists
        | CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => "invalid_request",
        CartsServiceError::Sql(_) => "error",
    }
}

/// Map a failed cart mutation to its response, counting the outcome.
pub(crate) fn into_api_error(mutation: CartMutation, error: CartsServiceError) -> ApiError {
    record_cart_mutation(mutation, outcome(&error));

    match error {
        CartsServiceError::InvalidQuantity => {
            ApiError::failure(StatusCode::BAD_REQUEST, "Quantity must be at least 1.")
        }
        CartsServiceError::InsufficientStock { available } => {
            let message = match mutation {
                CartMutation::Add => format!("Only {available} items available."),
                CartMutation::UpdateQuantity | CartMutation::Remove | CartMutation::Clear => {
                    format!("Only {available} items available in stock.")
                }
            };

            ApiError::failure(StatusCode::BAD_REQUEST, message)
        }
        CartsServiceError::QuantityExceedsLimit { max } => ApiError::failure(
            StatusCode::BAD_REQUEST,
            format!("Maximum order quantity is {max}."),
        ),
        CartsServiceError::NotFound => {
            let message = match mutation {
                CartMutation::Add => "Product not found.",
                CartMutation::UpdateQuantity | CartMutation::Remove | CartMutation::Clear => {
                    "Cart item not found."
                }
            };

            ApiError::failure(StatusCode::NOT_FOUND, message)
        }
        CartsServiceError::AlreadyExists
        | CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            warn!("rejected cart mutation: {error}");

            ApiError::generic()
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            ApiError::failure(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE)
        }
    }
}

/// Response for a cart mutation body that could not be parsed.
pub(crate) fn malformed_request(mutation: CartMutation, source: impl std::fmt::Display) -> ApiError {
    record_cart_mutation(mutation, "invalid_request");

    warn!("malformed cart request: {source}");

    ApiError::generic()
}
