//! Remove From Wishlist Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::warn;

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    wishlists::{
        errors::into_api_error,
        handlers::{WishlistMutationResponse, WishlistProductRequest},
    },
};

/// Remove From Wishlist Handler
#[endpoint(
    tags("wishlist"),
    summary = "Remove From Wishlist",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "wishlist.remove",
    skip(req, depot),
    fields(user_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<WishlistMutationResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let request = req
        .parse_json::<WishlistProductRequest>()
        .await
        .map_err(|source| {
            warn!("malformed wishlist request: {source}");

            ApiError::generic()
        })?;

    state
        .app
        .wishlists
        .remove_product(user, request.product_id.into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(WishlistMutationResponse {
        success: true,
        message: "Removed from your wishlist.".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::domain::wishlists::{MockWishlistsService, WishlistsServiceError};

    use crate::test_helpers::TestServices;

    use super::*;

    fn make_service(wishlists: MockWishlistsService) -> Service {
        TestServices {
            wishlists,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("wishlist/remove").post(handler))
    }

    #[tokio::test]
    async fn test_remove_returns_200() -> TestResult {
        let mut wishlists = MockWishlistsService::new();

        wishlists
            .expect_remove_product()
            .once()
            .return_once(|_, _| Ok(()));

        let res = TestClient::post("http://example.com/wishlist/remove")
            .json(&json!({ "product_id": Uuid::now_v7() }))
            .send(&make_service(wishlists))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_product_id_returns_generic_failure() -> TestResult {
        let mut wishlists = MockWishlistsService::new();

        wishlists.expect_remove_product().never();

        let res = TestClient::post("http://example.com/wishlist/remove")
            .json(&json!({}))
            .send(&make_service(wishlists))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_entry_not_on_list_returns_404() -> TestResult {
        let mut wishlists = MockWishlistsService::new();

        wishlists
            .expect_remove_product()
            .once()
            .return_once(|_, _| Err(WishlistsServiceError::NotFound));

        let res = TestClient::post("http://example.com/wishlist/remove")
            .json(&json!({ "product_id": Uuid::now_v7() }))
            .send(&make_service(wishlists))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
