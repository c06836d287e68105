//! Pricing
//!
//! Pure price arithmetic shared by the catalog and carts. Nothing here touches
//! storage; callers hand in the catalog values they have already loaded.

use rust_decimal::Decimal;

/// Number of fractional digits carried by every monetary amount.
pub const AMOUNT_SCALE: u32 = 2;

/// A priced cart line.
pub trait PricedLine {
    /// Base price of the product.
    fn product_price(&self) -> Decimal;

    /// Price adjustment of the chosen variant, if any.
    fn variant_adjustment(&self) -> Option<Decimal>;

    /// Pre-discount price of the product, if it is on sale.
    fn original_price(&self) -> Option<Decimal>;

    /// Advertised discount percentage of the product.
    fn discount_percentage(&self) -> u8;

    /// Units on the line.
    fn quantity(&self) -> u32;
}

/// Final price of a variant. Never negative.
#[must_use]
pub fn variant_final_price(product_price: Decimal, price_adjustment: Decimal) -> Decimal {
    (product_price + price_adjustment).max(Decimal::ZERO)
}

/// Price of one unit on a line: the variant's final price when a variant is
/// chosen, the product price otherwise.
#[must_use]
pub fn unit_price<L: PricedLine + ?Sized>(line: &L) -> Decimal {
    match line.variant_adjustment() {
        Some(adjustment) => variant_final_price(line.product_price(), adjustment),
        None => line.product_price(),
    }
}

#[must_use]
pub fn line_total<L: PricedLine + ?Sized>(line: &L) -> Decimal {
    unit_price(line) * Decimal::from(line.quantity())
}

/// Savings on a line against the product's original price.
///
/// Only products with both an original price and a positive discount
/// percentage count as discounted.
#[must_use]
pub fn line_savings<L: PricedLine + ?Sized>(line: &L) -> Decimal {
    match line.original_price() {
        Some(original) if line.discount_percentage() > 0 => {
            (original - line.product_price()) * Decimal::from(line.quantity())
        }
        _ => Decimal::ZERO,
    }
}

#[must_use]
pub fn cart_total<L: PricedLine>(lines: &[L]) -> Decimal {
    lines.iter().map(line_total).sum()
}

#[must_use]
pub fn cart_savings<L: PricedLine>(lines: &[L]) -> Decimal {
    lines.iter().map(line_savings).sum()
}

#[must_use]
pub fn total_items<L: PricedLine>(lines: &[L]) -> u32 {
    lines
        .iter()
        .map(PricedLine::quantity)
        .fold(0, u32::saturating_add)
}

/// Discount amount advertised for a product.
#[must_use]
pub fn discount_amount(original_price: Option<Decimal>, discount_percentage: u8) -> Decimal {
    match original_price {
        Some(original) if discount_percentage > 0 => {
            (original * Decimal::from(discount_percentage) / Decimal::ONE_HUNDRED)
                .round_dp(AMOUNT_SCALE)
        }
        _ => Decimal::ZERO,
    }
}

/// Render an amount with exactly two fractional digits.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(AMOUNT_SCALE);

    rounded.rescale(AMOUNT_SCALE);

    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> Decimal {
        value.parse().expect("valid decimal literal")
    }

    struct Line {
        price: Decimal,
        adjustment: Option<Decimal>,
        original_price: Option<Decimal>,
        discount_percentage: u8,
        quantity: u32,
    }

    impl PricedLine for Line {
        fn product_price(&self) -> Decimal {
            self.price
        }

        fn variant_adjustment(&self) -> Option<Decimal> {
            self.adjustment
        }

        fn original_price(&self) -> Option<Decimal> {
            self.original_price
        }

        fn discount_percentage(&self) -> u8 {
            self.discount_percentage
        }

        fn quantity(&self) -> u32 {
            self.quantity
        }
    }

    fn line(price: Decimal, quantity: u32) -> Line {
        Line {
            price,
            adjustment: None,
            original_price: None,
            discount_percentage: 0,
            quantity,
        }
    }

    #[test]
    fn unit_price_uses_variant_final_price() {
        let mut item = line(d("100.00"), 1);

        assert_eq!(unit_price(&item), d("100.00"));

        item.adjustment = Some(d("15.50"));

        assert_eq!(unit_price(&item), d("115.50"));
    }

    #[test]
    fn variant_final_price_is_floored_at_zero() {
        assert_eq!(variant_final_price(d("10.00"), d("-25.00")), Decimal::ZERO);
        assert_eq!(variant_final_price(d("10.00"), d("-2.50")), d("7.50"));
    }

    #[test]
    fn cart_total_is_sum_of_line_totals() {
        let lines = vec![
            line(d("19.99"), 3),
            Line {
                adjustment: Some(d("-5.00")),
                ..line(d("50.00"), 2)
            },
            line(d("0.01"), 7),
        ];

        let expected: Decimal = lines.iter().map(line_total).sum();

        assert_eq!(cart_total(&lines), expected);
        assert_eq!(cart_total(&lines), d("150.04"));
        assert_eq!(total_items(&lines), 12);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let lines: Vec<Line> = Vec::new();

        assert_eq!(format_amount(cart_total(&lines)), "0.00");
        assert_eq!(format_amount(cart_savings(&lines)), "0.00");
        assert_eq!(total_items(&lines), 0);
    }

    #[test]
    fn savings_require_original_price_and_discount() {
        let discounted = Line {
            original_price: Some(d("120.00")),
            discount_percentage: 20,
            ..line(d("96.00"), 2)
        };

        let no_percentage = Line {
            original_price: Some(d("120.00")),
            ..line(d("96.00"), 2)
        };

        let no_original = Line {
            discount_percentage: 20,
            ..line(d("96.00"), 2)
        };

        assert_eq!(line_savings(&discounted), d("48.00"));
        assert_eq!(line_savings(&no_percentage), Decimal::ZERO);
        assert_eq!(line_savings(&no_original), Decimal::ZERO);
        assert_eq!(
            cart_savings(&[discounted, no_percentage, no_original]),
            d("48.00")
        );
    }

    #[test]
    fn discount_amount_is_percentage_of_original_price() {
        assert_eq!(discount_amount(Some(d("199.99")), 15), d("30.00"));
        assert_eq!(discount_amount(Some(d("199.99")), 0), Decimal::ZERO);
        assert_eq!(discount_amount(None, 15), Decimal::ZERO);
    }

    #[test]
    fn format_amount_always_has_two_digits() {
        assert_eq!(format_amount(d("5")), "5.00");
        assert_eq!(format_amount(d("5.5")), "5.50");
        assert_eq!(format_amount(d("5.556")), "5.56");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }
}
