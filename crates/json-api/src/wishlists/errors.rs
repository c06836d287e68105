//! Wishlist Errors

use salvo::http::StatusCode;
use tracing::error;

use storefront_app::domain::wishlists::WishlistsServiceError;

use crate::errors::{ApiError, GENERIC_FAILURE_MESSAGE};

pub(crate) fn into_api_error(error: WishlistsServiceError) -> ApiError {
    match error {
        WishlistsServiceError::NotFound => {
            ApiError::failure(StatusCode::NOT_FOUND, "Product not found.")
        }
        WishlistsServiceError::AlreadyExists | WishlistsServiceError::InvalidReference => {
            ApiError::generic()
        }
        WishlistsServiceError::Sql(source) => {
            error!("wishlist storage error: {source}");

            ApiError::failure(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE)
        }
    }
}
