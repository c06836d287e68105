//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{
        errors::{into_api_error, malformed_request},
        responses::CartMutationResponse,
    },
    errors::ApiError,
    extensions::*,
    observability::{CartMutation, record_cart_mutation},
    state::State,
};

/// Remove Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveItemRequest {
    pub item_id: Uuid,
}

/// Remove From Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Remove From Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
    ),
)]
#[tracing::instrument(
    name = "cart.remove",
    skip(req, depot),
    fields(user_uuid = tracing::field::Empty, item_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let request = req
        .parse_json::<RemoveItemRequest>()
        .await
        .map_err(|source| malformed_request(CartMutation::Remove, source))?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("item_uuid", tracing::field::display(request.item_id));

    let totals = state
        .app
        .carts
        .remove_item(user, request.item_id.into())
        .await
        .map_err(|error| into_api_error(CartMutation::Remove, error))?;

    record_cart_mutation(CartMutation::Remove, "ok");

    Ok(Json(CartMutationResponse::success(
        "Item removed from cart successfully!",
        &totals,
    )))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::{
        carts::handlers::tests::totals,
        errors::FailureResponse,
        test_helpers::{TEST_USER_UUID, TestServices},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestServices {
            carts,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("cart/remove").post(handler))
    }

    #[tokio::test]
    async fn test_remove_returns_empty_totals() -> TestResult {
        let item = Uuid::now_v7();
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |user, removed| *user == TEST_USER_UUID && removed.into_uuid() == item)
            .return_once(|_, _| Ok(totals(0, Decimal::ZERO)));

        let mut res = TestClient::post("http://example.com/cart/remove")
            .json(&json!({ "item_id": item }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartMutationResponse = res.take_json().await?;

        assert_eq!(body.message, "Item removed from cart successfully!");
        assert_eq!(body.cart_total_price, "0.00");
        assert!(body.item_total_price.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let mut res = TestClient::post("http://example.com/cart/remove")
            .json(&json!({ "item_id": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        let body: FailureResponse = res.take_json().await?;

        assert_eq!(body.message, "Cart item not found.");

        Ok(())
    }
}
