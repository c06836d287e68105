//! Sign Up Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::accounts::data::SignUpForm;

use crate::{
    accounts::{errors::into_api_error, profile::UserResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Sign Up Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignUpRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub terms_accepted: bool,
}

impl From<SignUpRequest> for SignUpForm {
    fn from(request: SignUpRequest) -> Self {
        SignUpForm {
            email: request.email,
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
            password_confirmation: request.password_confirmation,
            terms_accepted: request.terms_accepted,
        }
    }
}

/// Sign Up Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignUpResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Sign Up Handler
#[endpoint(
    tags("accounts"),
    summary = "Create Account",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "accounts.signup", skip_all, err(Debug))]
pub(crate) async fn handler(
    json: JsonBody<SignUpRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SignUpResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .accounts
        .register(json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    tracing::info!(user_uuid = %user.uuid, "created account");

    Ok(Json(SignUpResponse {
        message: format!(
            "Welcome {}! Your account has been created successfully. Please sign in to continue.",
            user.first_name
        ),
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::accounts::{
        AccountsServiceError, MockAccountsService, ValidationErrors, records::UserUuid,
    };

    use crate::{
        errors::ValidationErrorsResponse,
        test_helpers::{TestServices, make_user},
    };

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        TestServices {
            accounts,
            ..TestServices::default()
        }
        .public(Router::with_path("accounts/signup").post(handler))
    }

    fn body() -> serde_json::Value {
        json!({
            "email": "Ada@Example.com",
            "username": "ada",
            "first_name": "ada",
            "last_name": "lovelace",
            "password": "Passw0rd!",
            "password_confirmation": "Passw0rd!",
            "terms_accepted": true,
        })
    }

    #[tokio::test]
    async fn test_signup_returns_201() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register()
            .once()
            .withf(|form| form.email == "Ada@Example.com" && form.terms_accepted)
            .return_once(|_| Ok(make_user(UserUuid::new())));

        let mut res = TestClient::post("http://example.com/accounts/signup")
            .json(&body())
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let response: SignUpResponse = res.take_json().await?;

        assert_eq!(response.user.username, "ada");
        assert!(response.message.starts_with("Welcome Ada!"));

        Ok(())
    }

    #[tokio::test]
    async fn test_signup_validation_errors_return_422() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts.expect_register().once().return_once(|_| {
            let mut errors = ValidationErrors::default();

            errors.add("username", "This username is already taken.");

            Err(AccountsServiceError::Validation(errors))
        });

        let mut res = TestClient::post("http://example.com/accounts/signup")
            .json(&body())
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        let response: ValidationErrorsResponse = res.take_json().await?;

        assert_eq!(
            response.errors.get("username"),
            Some(&vec!["This username is already taken.".to_string()])
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_signup_storage_error_returns_500() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_register()
            .once()
            .return_once(|_| Err(AccountsServiceError::Sql(sqlx::Error::PoolClosed)));

        let res = TestClient::post("http://example.com/accounts/signup")
            .json(&body())
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
