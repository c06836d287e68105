//! Cart Handlers

pub(crate) mod add;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove;
pub(crate) mod update_quantity;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use storefront_app::domain::carts::records::{
        CartItemRecord, CartItemUuid, CartLineRecord, CartTotals, CartUuid,
    };

    use crate::test_helpers::make_product;

    pub(super) fn make_line(quantity: u32, price: Decimal) -> CartLineRecord {
        let product = make_product("Desk Lamp", "desk-lamp", price);

        CartLineRecord {
            item: CartItemRecord {
                uuid: CartItemUuid::new(),
                cart_uuid: CartUuid::new(),
                product_uuid: product.uuid,
                variant_uuid: None,
                quantity,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            product_name: product.name,
            product_slug: product.slug,
            price,
            original_price: None,
            discount_percentage: 0,
            max_order_quantity: product.max_order_quantity,
            variant_name: None,
            price_adjustment: None,
            available_stock: product.stock_quantity,
            main_image_url: None,
        }
    }

    pub(super) fn totals(total_items: u32, total_price: Decimal) -> CartTotals {
        CartTotals {
            total_items,
            total_price,
            savings: Decimal::ZERO,
        }
    }
}
