//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::accounts::data::LoginForm;

use crate::{
    accounts::{errors::into_api_error, profile::UserResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Keep the session for thirty days instead of one
    #[serde(default)]
    pub remember_me: bool,
}

impl From<LoginRequest> for LoginForm {
    fn from(request: LoginRequest) -> Self {
        LoginForm {
            email: request.email,
            password: request.password,
            remember_me: request.remember_me,
        }
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginResponse {
    pub message: String,

    /// Bearer token; shown once
    pub token: String,

    pub expires_at: String,
    pub user: UserResponse,
}

/// Login Handler
///
/// Checks credentials and issues a session token.
#[endpoint(
    tags("accounts"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Session issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown email or wrong password"),
        (status_code = StatusCode::FORBIDDEN, description = "Account deactivated"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
    ),
)]
#[tracing::instrument(name = "accounts.login", skip_all, err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .accounts
        .login(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    let greeting = if issued.user.first_name.is_empty() {
        issued.user.username.clone()
    } else {
        issued.user.first_name.clone()
    };

    tracing::info!(user_uuid = %issued.user.uuid, session_uuid = %issued.session.uuid, "logged in");

    Ok(Json(LoginResponse {
        message: format!("Welcome back, {greeting}!"),
        token: issued.token,
        expires_at: issued.session.expires_at.to_string(),
        user: issued.user.into(),
    }))
}
