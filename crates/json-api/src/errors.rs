//! API error responses.

use std::collections::BTreeMap;

use salvo::{
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::accounts::ValidationErrors;

/// Message returned for malformed requests and storage failures.
pub(crate) const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// Failure Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FailureResponse {
    /// Always `false`
    pub success: bool,

    /// Human readable reason
    pub message: String,
}

/// Validation Errors Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ValidationErrorsResponse {
    /// Messages keyed by field; form-wide messages are under `__all__`
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Errors a handler can answer with.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// Plain status error rendered by salvo.
    Status(StatusError),

    /// 422 with per-field messages.
    Validation(ValidationErrors),

    /// Status with a `{ success: false, message }` body.
    Failure { status: StatusCode, message: String },
}

impl ApiError {
    pub(crate) fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Failure {
            status,
            message: message.into(),
        }
    }

    /// A 400 carrying the generic failure message.
    pub(crate) fn generic() -> Self {
        Self::failure(StatusCode::BAD_REQUEST, GENERIC_FAILURE_MESSAGE)
    }
}

impl From<StatusError> for ApiError {
    fn from(error: StatusError) -> Self {
        Self::Status(error)
    }
}

#[async_trait]
impl Writer for ApiError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        match self {
            Self::Status(error) => res.render(error),
            Self::Validation(errors) => {
                res.status_code(StatusCode::UNPROCESSABLE_ENTITY);
                res.render(Json(ValidationErrorsResponse {
                    errors: errors.into_inner(),
                }));
            }
            Self::Failure { status, message } => {
                res.status_code(status);
                res.render(Json(FailureResponse {
                    success: false,
                    message,
                }));
            }
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        StatusError::register(components, operation);

        operation.responses.insert(
            StatusCode::UNPROCESSABLE_ENTITY.as_str(),
            oapi::Response::new("Validation failed").add_content(
                "application/json",
                ValidationErrorsResponse::to_schema(components),
            ),
        );
    }
}
