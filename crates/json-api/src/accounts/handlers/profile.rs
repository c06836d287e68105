//! Get Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::accounts::records::UserRecord;

use crate::{accounts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone_number: String,

    /// `YYYY-MM-DD`
    pub date_of_birth: Option<String>,

    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,

    /// Non-empty address parts joined with commas
    pub full_address: String,

    pub is_email_verified: bool,
    pub created_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            full_name: user.full_name(),
            full_address: user.full_address(),
            uuid: user.uuid.into_uuid(),
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            date_of_birth: user.date_of_birth.map(|date| date.to_string()),
            address_line_1: user.address_line_1,
            address_line_2: user.address_line_2,
            city: user.city,
            state: user.state,
            country: user.country,
            postal_code: user.postal_code,
            is_email_verified: user.is_email_verified,
            created_at: user.created_at.to_string(),
        }
    }
}

/// Get Profile Handler
#[endpoint(
    tags("accounts"),
    summary = "Get Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .accounts
        .get_profile(user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::accounts::{AccountsServiceError, MockAccountsService};

    use crate::test_helpers::{TEST_USER_UUID, TestServices, make_user};

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        TestServices {
            accounts,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("accounts/profile").get(handler))
    }

    #[tokio::test]
    async fn test_profile_returns_current_user() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_get_profile()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|user| {
                let mut record = make_user(user);

                record.date_of_birth = Some(date(1815, 12, 10));
                record.city = "London".to_string();
                record.country = "UK".to_string();

                Ok(record)
            });

        let mut res = TestClient::get("http://example.com/accounts/profile")
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: UserResponse = res.take_json().await?;

        assert_eq!(body.uuid, TEST_USER_UUID.into_uuid());
        assert_eq!(body.full_name, "Ada Lovelace");
        assert_eq!(body.full_address, "London, UK");
        assert_eq!(body.date_of_birth.as_deref(), Some("1815-12-10"));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_profile_returns_404() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_get_profile()
            .once()
            .return_once(|_| Err(AccountsServiceError::NotFound));

        let res = TestClient::get("http://example.com/accounts/profile")
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
