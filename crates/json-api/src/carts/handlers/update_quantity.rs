//! Update Cart Quantity Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    carts::{data::DEFAULT_ADD_QUANTITY, records::QuantityOutcome},
    pricing::format_amount,
};

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

/// Update Quantity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateQuantityRequest {
    pub item_id: Uuid,

    /// New quantity; zero or less removes the line
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

const fn default_quantity() -> i64 {
    DEFAULT_ADD_QUANTITY
}

/// Update Cart Quantity Handler
///
/// Overwrites the quantity of a line in the caller's cart.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated or line removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Stock or order limit exceeded"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
    ),
)]
#[tracing::instrument(
    name = "cart.update_quantity",
    skip(req, depot),
    fields(
        user_uuid = tracing::field::Empty,
        item_uuid = tracing::field::Empty,
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
        .parse_json::<UpdateQuantityRequest>()
        .await
        .map_err(|source| malformed_request(CartMutation::UpdateQuantity, source))?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("item_uuid", tracing::field::display(request.item_id));
    span.record("quantity", request.quantity);

    let updated = state
        .app
        .carts
        .update_quantity(user, request.item_id.into(), request.quantity)
        .await
        .map_err(|error| into_api_error(CartMutation::UpdateQuantity, error))?;

    record_cart_mutation(CartMutation::UpdateQuantity, "ok");

    let message = match updated.outcome {
        QuantityOutcome::Updated { .. } => "Cart updated successfully!",
        QuantityOutcome::Removed => "Item removed from cart.",
    };

    let mut response = CartMutationResponse::success(message, &updated.totals);

    response.item_total_price = Some(format_amount(updated.outcome.item_total()));

    Ok(Json(response))
}
