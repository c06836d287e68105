//! Wishlist Records

use jiff::Timestamp;

use crate::{accounts::records::UserUuid, domain::catalog::records::ProductRecord, uuids::TypedUuid};

/// Wishlist UUID
pub type WishlistUuid = TypedUuid<WishlistRecord>;

/// Wishlist Record
#[derive(Debug, Clone)]
pub struct WishlistRecord {
    pub uuid: WishlistUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
}

/// Wishlist Item UUID
pub type WishlistItemUuid = TypedUuid<WishlistEntryRecord>;

/// A wishlisted product.
#[derive(Debug, Clone)]
pub struct WishlistEntryRecord {
    pub uuid: WishlistItemUuid,
    pub product: ProductRecord,
    pub added_at: Timestamp,
}
