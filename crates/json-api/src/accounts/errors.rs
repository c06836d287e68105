//! Account Errors

use salvo::http::{StatusCode, StatusError};
use tracing::error;

use storefront_app::accounts::AccountsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AccountsServiceError) -> ApiError {
    match error {
        AccountsServiceError::Validation(errors) => ApiError::Validation(errors),
        AccountsServiceError::NoAccount | AccountsServiceError::InvalidCredentials => {
            ApiError::failure(StatusCode::UNAUTHORIZED, error.to_string())
        }
        AccountsServiceError::AccountDeactivated => {
            ApiError::failure(StatusCode::FORBIDDEN, error.to_string())
        }
        AccountsServiceError::AlreadyExists => ApiError::failure(
            StatusCode::CONFLICT,
            "An account with this email address or username already exists.",
        ),
        AccountsServiceError::NotFound => StatusError::not_found().brief("Account not found").into(),
        AccountsServiceError::Hashing(source) => {
            error!("failed to hash or verify password: {source}");

            StatusError::internal_server_error().into()
        }
        AccountsServiceError::Join(source) => {
            error!("password hashing task failed: {source}");

            StatusError::internal_server_error().into()
        }
        AccountsServiceError::Clock(source) => {
            error!("failed to compute session expiry: {source}");

            StatusError::internal_server_error().into()
        }
        AccountsServiceError::Sql(source) => {
            error!("account storage error: {source}");

            StatusError::internal_server_error().into()
        }
    }
}
