//! Test Helpers

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a decimal literal.
pub(crate) fn price(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}
