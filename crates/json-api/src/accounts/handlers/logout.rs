//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{accounts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    pub message: String,
}

/// Logout Handler
///
/// Revokes the session behind the bearer token.
#[endpoint(
    tags("accounts"),
    summary = "Log Out",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(name = "accounts.logout", skip_all, err(Debug))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LogoutResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let token = depot.bearer_token_or_401()?;

    state
        .app
        .accounts
        .logout(token)
        .await
        .map_err(into_api_error)?;

    Ok(Json(LogoutResponse {
        message: "You have been logged out successfully.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::accounts::{AccountsServiceError, MockAccountsService};

    use crate::test_helpers::{TEST_BEARER_TOKEN, TestServices};

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        TestServices {
            accounts,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("accounts/logout").post(handler))
    }

    #[tokio::test]
    async fn test_logout_revokes_current_token() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_logout()
            .once()
            .withf(|token| token == TEST_BEARER_TOKEN)
            .return_once(|_| Ok(()));

        let mut res = TestClient::post("http://example.com/accounts/logout")
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: LogoutResponse = res.take_json().await?;

        assert_eq!(body.message, "You have been logged out successfully.");

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_of_revoked_session_returns_404() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_logout()
            .once()
            .return_once(|_| Err(AccountsServiceError::NotFound));

        let res = TestClient::post("http://example.com/accounts/logout")
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
