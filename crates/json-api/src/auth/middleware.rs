//! Session authentication hoop.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{Span, error};

use storefront_app::accounts::{
    AccountsServiceError, records::UserUuid, token::parse_session_token,
};

use crate::{extensions::*, state::State};

/// Resolve the bearer token to a user and stash both in the depot. Anything
/// short of a live session stops the request with 401.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let token = bearer_token(req).map(str::to_string);

    match authenticate(token, depot).await {
        Ok((user, token)) => {
            Span::current().record("user_uuid", tracing::field::display(user));

            depot.insert_user_uuid(user);
            depot.insert_bearer_token(&token);

            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();
        }
    }
}

async fn authenticate(
    token: Option<String>,
    depot: &Depot,
) -> Result<(UserUuid, String), StatusError> {
    let token = token
        .ok_or_else(|| StatusError::unauthorized().brief("Missing or invalid Authorization header"))?;

    // Malformed tokens never reach the database.
    if parse_session_token(&token).is_err() {
        return Err(StatusError::unauthorized().brief("Invalid or expired session token"));
    }

    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.accounts.authenticate_bearer(&token).await {
        Ok(user) => Ok((user, token)),
        Err(AccountsServiceError::NotFound) => {
            Err(StatusError::unauthorized().brief("Invalid or expired session token"))
        }
        Err(source) => {
            error!("failed to resolve session token: {source}");

            Err(StatusError::internal_server_error())
        }
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let (scheme, token) = req
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split_once(' ')?;

    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::accounts::MockAccountsService;

    use crate::test_helpers::{TEST_BEARER_TOKEN, TestServices};

    use super::*;

    #[salvo::handler]
    async fn whoami(depot: &mut Depot) -> String {
        depot
            .user_uuid_or_401()
            .map_or_else(|_| "anonymous".to_string(), |user| user.to_string())
    }

    fn service(accounts: MockAccountsService) -> Service {
        let state = TestServices {
            accounts,
            ..TestServices::default()
        }
        .into_state();

        Service::new(
            Router::new()
                .hoop(inject(state))
                .hoop(handler)
                .get(whoami),
        )
    }

    async fn status_for(accounts: MockAccountsService, authorization: Option<&str>) -> Option<StatusCode> {
        let mut client = TestClient::get("http://example.com");

        if let Some(value) = authorization {
            client = client.add_header(AUTHORIZATION, value, true);
        }

        client.send(&service(accounts)).await.status_code
    }

    #[tokio::test]
    async fn rejects_requests_without_a_bearer_token() {
        for header in [None, Some("Basic abc123"), Some("Bearer "), Some("Bearer")] {
            let mut accounts = MockAccountsService::new();

            accounts.expect_authenticate_bearer().never();

            assert_eq!(
                status_for(accounts, header).await,
                Some(StatusCode::UNAUTHORIZED),
                "{header:?}"
            );
        }
    }

    #[tokio::test]
    async fn malformed_tokens_skip_the_lookup() {
        let mut accounts = MockAccountsService::new();

        accounts.expect_authenticate_bearer().never();

        assert_eq!(
            status_for(accounts, Some("Bearer sf_v1_abc.def")).await,
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[tokio::test]
    async fn unknown_or_expired_session_is_unauthorized() {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_authenticate_bearer()
            .once()
            .withf(|token| token == TEST_BEARER_TOKEN)
            .return_once(|_| Err(AccountsServiceError::NotFound));

        assert_eq!(
            status_for(accounts, Some(&format!("Bearer {TEST_BEARER_TOKEN}"))).await,
            Some(StatusCode::UNAUTHORIZED)
        );
    }

    #[tokio::test]
    async fn storage_failure_is_a_server_error() {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AccountsServiceError::Sql(sqlx::Error::PoolClosed)));

        assert_eq!(
            status_for(accounts, Some(&format!("Bearer {TEST_BEARER_TOKEN}"))).await,
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[tokio::test]
    async fn live_session_exposes_the_user() -> TestResult {
        let user = UserUuid::from_uuid(Uuid::nil());

        let mut accounts = MockAccountsService::new();

        accounts
            .expect_authenticate_bearer()
            .once()
            .return_once(move |_| Ok(user));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("bearer {TEST_BEARER_TOKEN}"), true)
            .send(&service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, user.to_string());

        Ok(())
    }
}
