//! Review Errors

use salvo::http::{StatusCode, StatusError};
use tracing::error;

use storefront_app::domain::reviews::ReviewsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ReviewsServiceError) -> ApiError {
    match error {
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Product not found").into(),
        ReviewsServiceError::AlreadyExists => ApiError::failure(
            StatusCode::CONFLICT,
            "You have already reviewed this product.",
        ),
        ReviewsServiceError::InvalidRating => ApiError::failure(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Rating must be between 1 and 5.",
        ),
        ReviewsServiceError::InvalidReference
        | ReviewsServiceError::MissingRequiredData
        | ReviewsServiceError::InvalidData => ApiError::generic(),
        ReviewsServiceError::Sql(source) => {
            error!("review storage error: {source}");

            StatusError::internal_server_error().into()
        }
    }
}
