//! Cart Data

use crate::domain::catalog::records::{ProductUuid, VariantUuid};

/// Quantity added when a request names none.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;

/// A request to put a product (and optionally one of its variants) in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product: ProductUuid,
    pub variant: Option<VariantUuid>,
    pub quantity: i64,
}
