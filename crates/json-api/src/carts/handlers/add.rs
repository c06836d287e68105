//! Add To Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::data::{DEFAULT_ADD_QUANTITY, NewCartItem};

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

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    pub product_id: Uuid,
    #[serde(default)]
    pub variant_id: Option<Uuid>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    DEFAULT_ADD_QUANTITY
}

impl From<AddToCartRequest> for NewCartItem {
    fn from(request: AddToCartRequest) -> Self {
        NewCartItem {
            product: request.product_id.into(),
            variant: request.variant_id.map(Into::into),
            quantity: request.quantity,
        }
    }
}

/// Add To Cart Handler
///
/// Adds a product, or one of its variants, to the caller's cart. Adding a
/// line already in the cart accumulates onto it, capped at the product's
/// maximum order quantity. Requests beyond available stock leave the cart
/// untouched.
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity, stock or request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or variant not found"),
    ),
)]
#[tracing::instrument(
    name = "cart.add",
    skip(req, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err(Debug)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CartMutationResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let request = req
        .parse_json::<AddToCartRequest>()
        .await
        .map_err(|source| malformed_request(CartMutation::Add, source))?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(request.product_id));
    span.record("quantity", request.quantity);

    let added = state
        .app
        .carts
        .add_item(user, request.into())
        .await
        .map_err(|error| into_api_error(CartMutation::Add, error))?;

    record_cart_mutation(CartMutation::Add, "ok");

    tracing::info!(item_uuid = %added.item.uuid, quantity = added.item.quantity, "added to cart");

    Ok(Json(CartMutationResponse::success(
        "Product added to cart!",
        &added.totals,
    )))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        CartsServiceError, MockCartsService,
        records::{AddedCartItem, CartItemRecord, CartItemUuid, CartUuid},
    };

    use crate::{
        carts::handlers::tests::totals,
        errors::{FailureResponse, GENERIC_FAILURE_MESSAGE},
        test_helpers::{TEST_USER_UUID, TestServices},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        TestServices {
            carts,
            ..TestServices::default()
        }
        .authenticated(Router::with_path("cart/add").post(handler))
    }

    fn added(item: NewCartItem) -> AddedCartItem {
        AddedCartItem {
            item: CartItemRecord {
                uuid: CartItemUuid::new(),
                cart_uuid: CartUuid::new(),
                product_uuid: item.product,
                variant_uuid: item.variant,
                quantity: 3,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            totals: totals(3, Decimal::new(3_750, 2)),
        }
    }

    #[tokio::test]
    async fn test_add_reports_cart_totals() -> TestResult {
        let product = Uuid::now_v7();
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |user, item| {
                *user == TEST_USER_UUID
                    && item.product.into_uuid() == product
                    && item.variant.is_none()
                    && item.quantity == 3
            })
            .return_once(|_, item| Ok(added(item)));

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "product_id": product, "quantity": 3 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartMutationResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.message, "Product added to cart!");
        assert_eq!(body.cart_total_items, 3);
        assert_eq!(body.cart_total_price, "37.50");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_defaults_to_one() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, item| item.quantity == 1)
            .return_once(|_, item| Ok(added(item)));

        let res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "product_id": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_message() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InsufficientStock { available: 5 }));

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "product_id": Uuid::now_v7(), "quantity": 6 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: FailureResponse = res.take_json().await?;

        assert!(!body.success);
        assert_eq!(body.message, "Only 5 items available.");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body_returns_generic_failure() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_item().never();

        let mut res = TestClient::post("http://example.com/cart/add")
            .json(&json!({ "product_id": "not-a-uuid" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: FailureResponse = res.take_json().await?;

        assert_eq!(body.message, GENERIC_FAILURE_MESSAGE);

        Ok(())
    }
}
