//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::accounts::records::UserUuid;

const USER_UUID_KEY: &str = "storefront.user_uuid";
const BEARER_TOKEN_KEY: &str = "storefront.bearer_token";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user_uuid(&mut self, user: UserUuid);

    /// The authenticated user, or 401 when the auth middleware did not run.
    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;

    fn insert_bearer_token(&mut self, token: &str);

    fn bearer_token_or_401(&self) -> Result<&str, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn insert_bearer_token(&mut self, token: &str) {
        self.insert(BEARER_TOKEN_KEY, token.to_string());
    }

    fn bearer_token_or_401(&self) -> Result<&str, StatusError> {
        self.get::<String>(BEARER_TOKEN_KEY)
            .map(String::as_str)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
