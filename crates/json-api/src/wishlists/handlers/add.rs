//! Add To Wishlist Handler

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

/// Add To Wishlist Handler
///
/// Adding a product already on the wishlist succeeds without a duplicate.
#[endpoint(
    tags("wishlist"),
    summary = "Add To Wishlist",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    name = "wishlist.add",
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

    let added = state
        .app
        .wishlists
        .add_product(user, request.product_id.into())
        .await
        .map_err(into_api_error)?;

    let message = if added {
        "Added to your wishlist."
    } else {
        "Already in your wishlist."
    };

    Ok(Json(WishlistMutationResponse {
        success: true,
        message: message.to_string(),
    }))
}
