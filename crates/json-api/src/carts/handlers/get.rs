//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use storefront_app::domain::{
    carts::records::{CartLineRecord, CartView},
    pricing::{format_amount, line_savings},
};

use crate::{extensions::*, state::State};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub item_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_slug: String,
    pub variant_id: Option<Uuid>,
    pub variant_name: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub total_price: String,
    pub savings: String,
    pub available_stock: u32,
    pub max_order_quantity: u32,
    pub image_url: Option<String>,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            item_id: line.item.uuid.into_uuid(),
            product_id: line.item.product_uuid.into_uuid(),
            variant_id: line.item.variant_uuid.map(Into::into),
            quantity: line.item.quantity,
            unit_price: format_amount(line.unit_price()),
            total_price: format_amount(line.line_total()),
            savings: format_amount(line_savings(&line)),
            product_name: line.product_name,
            product_slug: line.product_slug,
            variant_name: line.variant_name,
            available_stock: line.available_stock,
            max_order_quantity: line.max_order_quantity,
            image_url: line.main_image_url,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Absent until something is first added
    pub cart_id: Option<Uuid>,
    pub items: Vec<CartLineResponse>,
    pub total_items: u32,
    pub total_price: String,
    pub savings: String,
}

impl From<CartView> for CartResponse {
    fn from(cart: CartView) -> Self {
        Self {
            cart_id: cart.cart_uuid.map(Into::into),
            items: cart.lines.into_iter().map(Into::into).collect(),
            total_items: cart.totals.total_items,
            total_price: format_amount(cart.totals.total_price),
            savings: format_amount(cart.totals.savings),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart. Viewing never creates a cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state.app.carts.view_cart(user).await.map_err(|source| {
        error!("failed to load cart: {source}");

        StatusError::internal_server_error()
    })?;

    Ok(Json(cart.into()))
}
