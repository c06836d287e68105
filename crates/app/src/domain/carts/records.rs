//! Cart Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    accounts::records::UserUuid,
    domain::{
        catalog::records::{ProductUuid, VariantUuid},
        pricing::{self, PricedLine},
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<CartRecord>;

/// Cart Record
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: Option<VariantUuid>,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart item joined with the catalog data needed to price and limit it.
#[derive(Debug, Clone)]
pub struct CartLineRecord {
    pub item: CartItemRecord,
    pub product_name: String,
    pub product_slug: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub discount_percentage: u8,
    pub max_order_quantity: u32,
    pub variant_name: Option<String>,
    pub price_adjustment: Option<Decimal>,
    /// Variant stock when the line has a variant, product stock otherwise.
    pub available_stock: u32,
    pub main_image_url: Option<String>,
}

impl CartLineRecord {
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        pricing::unit_price(self)
    }

    #[must_use]
    pub fn line_total(&self) -> Decimal {
        pricing::line_total(self)
    }
}

impl PricedLine for CartLineRecord {
    fn product_price(&self) -> Decimal {
        self.price
    }

    fn variant_adjustment(&self) -> Option<Decimal> {
        self.price_adjustment
    }

    fn original_price(&self) -> Option<Decimal> {
        self.original_price
    }

    fn discount_percentage(&self) -> u8 {
        self.discount_percentage
    }

    fn quantity(&self) -> u32 {
        self.item.quantity
    }
}

/// Aggregate figures for a whole cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartTotals {
    pub total_items: u32,
    pub total_price: Decimal,
    pub savings: Decimal,
}

impl CartTotals {
    #[must_use]
    pub fn from_lines(lines: &[CartLineRecord]) -> Self {
        Self {
            total_items: pricing::total_items(lines),
            total_price: pricing::cart_total(lines),
            savings: pricing::cart_savings(lines),
        }
    }
}

/// A user's cart as shown to them.
#[derive(Debug, Clone, Default)]
pub struct CartView {
    /// `None` until the user first adds something.
    pub cart_uuid: Option<CartUuid>,
    pub lines: Vec<CartLineRecord>,
    pub totals: CartTotals,
}

/// Result of adding to a cart.
#[derive(Debug, Clone)]
pub struct AddedCartItem {
    pub item: CartItemRecord,
    pub totals: CartTotals,
}

/// What happened to a line on a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityOutcome {
    Updated { item_total: Decimal },
    Removed,
}

impl QuantityOutcome {
    /// Line total after the update; zero when the line is gone.
    #[must_use]
    pub fn item_total(&self) -> Decimal {
        match self {
            Self::Updated { item_total } => *item_total,
            Self::Removed => Decimal::ZERO,
        }
    }
}

/// Result of a quantity update.
#[derive(Debug, Clone, Copy)]
pub struct UpdatedQuantity {
    pub outcome: QuantityOutcome,
    pub totals: CartTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: &str) -> Decimal {
        value.parse().expect("valid decimal literal")
    }

    fn line(price: &str, adjustment: Option<&str>, quantity: u32) -> CartLineRecord {
        CartLineRecord {
            item: CartItemRecord {
                uuid: CartItemUuid::new(),
                cart_uuid: CartUuid::new(),
                product_uuid: ProductUuid::new(),
                variant_uuid: adjustment.map(|_| VariantUuid::new()),
                quantity,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            product_name: "Lamp".to_string(),
            product_slug: "lamp".to_string(),
            price: d(price),
            original_price: None,
            discount_percentage: 0,
            max_order_quantity: 10,
            variant_name: adjustment.map(|_| "Large".to_string()),
            price_adjustment: adjustment.map(d),
            available_stock: 10,
            main_image_url: None,
        }
    }

    #[test]
    fn totals_sum_line_totals() {
        let lines = [line("10.00", None, 2), line("10.00", Some("2.50"), 3)];

        let totals = CartTotals::from_lines(&lines);

        let summed: Decimal = lines.iter().map(CartLineRecord::line_total).sum();

        assert_eq!(totals.total_price, summed);
        assert_eq!(totals.total_price, d("57.50"));
        assert_eq!(totals.total_items, 5);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let totals = CartTotals::from_lines(&[]);

        assert_eq!(totals, CartTotals::default());
        assert_eq!(pricing::format_amount(totals.total_price), "0.00");
    }

    #[test]
    fn discounted_lines_report_savings() {
        let mut sale = line("80.00", None, 2);
        sale.original_price = Some(d("100.00"));
        sale.discount_percentage = 20;

        let totals = CartTotals::from_lines(&[sale, line("5.00", None, 1)]);

        assert_eq!(totals.savings, d("40.00"));
    }

    #[test]
    fn removed_line_totals_zero() {
        assert_eq!(QuantityOutcome::Removed.item_total(), Decimal::ZERO);
    }
}
