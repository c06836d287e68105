//! Get Wishlist Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::domain::wishlists::records::WishlistEntryRecord;

use crate::{
    catalog::get::ProductResponse, errors::ApiError, extensions::*,
    state::State, wishlists::errors::into_api_error,
};

/// Wishlist Entry Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistEntryResponse {
    pub product: ProductResponse,
    pub added_at: String,
}

impl From<WishlistEntryRecord> for WishlistEntryResponse {
    fn from(entry: WishlistEntryRecord) -> Self {
        Self {
            product: entry.product.into(),
            added_at: entry.added_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistResponse {
    /// Active wishlisted products, newest first
    pub items: Vec<WishlistEntryResponse>,
}

/// Get Wishlist Handler
#[endpoint(
    tags("wishlist"),
    summary = "Get Wishlist",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<WishlistResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let entries = state
        .app
        .wishlists
        .list_items(user)
        .await
        .map_err(into_api_error)?;

    Ok(Json(WishlistResponse {
        items: entries.into_iter().map(Into::into).collect(),
    }))
}
