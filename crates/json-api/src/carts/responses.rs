//! Cart Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::{carts::records::CartTotals, pricing::format_amount};

/// Cart Mutation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartMutationResponse {
    pub success: bool,
    pub message: String,
    pub cart_total_items: u32,

    /// Decimal string with two places
    pub cart_total_price: String,

    /// Line total after a quantity update; "0.00" when the line was removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_total_price: Option<String>,
}

impl CartMutationResponse {
    pub(crate) fn success(message: impl Into<String>, totals: &CartTotals) -> Self {
        Self {
            success: true,
            message: message.into(),
            cart_total_items: totals.total_items,
            cart_total_price: format_amount(totals.total_price),
            item_total_price: None,
        }
    }
}
