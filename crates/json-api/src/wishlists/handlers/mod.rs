//! Wishlist Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod remove;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wishlist Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistProductRequest {
    pub product_id: Uuid,
}

/// Wishlist Mutation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WishlistMutationResponse {
    pub success: bool,
    pub message: String,
}
