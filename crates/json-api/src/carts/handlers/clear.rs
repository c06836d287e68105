//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use storefront_app::domain::carts::records::CartTotals;

use crate::{
    carts::{errors::into_api_error, responses::CartMutationResponse},
    errors::ApiError,
    extensions::*,
    observability::{CartMutation, record_cart_mutation},
    state::State,
};

/// Clear Cart Handler
///
/// Removes every line from the caller's cart.
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(name = "cart.clear", skip(depot), err(Debug))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartMutationResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .carts
        .clear_cart(user)
        .await
        .map_err(|error| into_api_error(CartMutation::Clear, error))?;

    record_cart_mutation(CartMutation::Clear, "ok");

    Ok(Json(CartMutationResponse::success(
        "Cart cleared.",
        &CartTotals::default(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::MockCartsService;

    use crate::test_helpers::{TEST_USER_UUID, TestServices};

    use super::*;

    #[tokio::test]
    async fn test_clear_empties_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_clear_cart()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(()));

        let body: CartMutationResponse = TestClient::post("http://example.com/cart/clear")
            .send(
                &TestServices {
                    carts,
                    ..TestServices::default()
                }
                .authenticated(Router::with_path("cart/clear").post(handler)),
            )
            .await
            .take_json()
            .await?;

        assert!(body.success);
        assert_eq!(body.cart_total_items, 0);
        assert_eq!(body.cart_total_price, "0.00");

        Ok(())
    }
}
