//! Rating aggregation.

use rust_decimal::Decimal;

/// Average star rating over approved reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingSummary {
    /// Mean rating rounded to two places; zero without reviews.
    pub average: Decimal,
    pub count: u32,
}

impl RatingSummary {
    /// Build a summary from the number of approved reviews and the sum of
    /// their ratings.
    #[must_use]
    pub fn from_totals(count: u32, total: u64) -> Self {
        if count == 0 {
            return Self::default();
        }

        let average = (Decimal::from(total) / Decimal::from(count)).round_dp(2);

        Self { average, count }
    }

    /// Build a summary from individual ratings.
    #[must_use]
    pub fn from_ratings(ratings: &[u8]) -> Self {
        let count = u32::try_from(ratings.len()).unwrap_or(u32::MAX);
        let total = ratings.iter().map(|rating| u64::from(*rating)).sum();

        Self::from_totals(count, total)
    }
}
