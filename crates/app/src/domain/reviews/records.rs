//! Review Records

use jiff::Timestamp;

use crate::{
    accounts::records::UserUuid,
    domain::{catalog::records::ProductUuid, reviews::rating::RatingSummary},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Review Record, joined with the reviewer's username.
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,
    pub user_uuid: UserUuid,
    pub username: String,
    pub rating: u8,
    pub title: String,
    pub body: String,
    pub is_approved: bool,
    pub is_verified_purchase: bool,
    pub helpful_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Approved reviews of a product with its rating summary.
#[derive(Debug, Clone)]
pub struct ProductReviews {
    pub reviews: Vec<ReviewRecord>,
    pub rating: RatingSummary,
}
