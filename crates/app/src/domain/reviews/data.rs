//! Review Data

use crate::domain::reviews::records::ReviewUuid;

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// New Review Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub rating: u8,
    pub title: String,
    pub body: String,
}

impl NewReview {
    #[must_use]
    pub fn has_valid_rating(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }
}
