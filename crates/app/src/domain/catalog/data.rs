//! Catalog Data

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::catalog::records::{
    BrandUuid, CategoryUuid, ProductImageUuid, ProductUuid, VariantUuid,
};

/// Default low-stock threshold for new products.
pub const DEFAULT_MIN_STOCK_LEVEL: u32 = 5;

/// Default per-order quantity cap for new products.
pub const DEFAULT_MAX_ORDER_QUANTITY: u32 = 10;

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// New Brand Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewBrand {
    pub uuid: BrandUuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
}

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    /// Generated from the product UUID when omitted.
    pub sku: Option<String>,
    pub brand: BrandUuid,
    pub category: CategoryUuid,
    pub description: String,
    pub short_description: String,
    pub features: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub discount_percentage: u8,
    pub stock_quantity: u32,
    pub min_stock_level: u32,
    pub max_order_quantity: u32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_bestseller: bool,
    pub is_new_arrival: bool,
    pub tags: String,
    pub weight: Option<Decimal>,
    pub dimensions: String,
    pub free_shipping: bool,
    pub shipping_class: String,
}

impl Default for NewProduct {
    fn default() -> Self {
        Self {
            uuid: ProductUuid::new(),
            name: String::new(),
            slug: String::new(),
            sku: None,
            brand: BrandUuid::new(),
            category: CategoryUuid::new(),
            description: String::new(),
            short_description: String::new(),
            features: Vec::new(),
            specifications: BTreeMap::new(),
            price: Decimal::ZERO,
            original_price: None,
            discount_percentage: 0,
            stock_quantity: 0,
            min_stock_level: DEFAULT_MIN_STOCK_LEVEL,
            max_order_quantity: DEFAULT_MAX_ORDER_QUANTITY,
            is_active: true,
            is_featured: false,
            is_bestseller: false,
            is_new_arrival: false,
            tags: String::new(),
            weight: None,
            dimensions: String::new(),
            free_shipping: false,
            shipping_class: "standard".to_string(),
        }
    }
}

/// New Product Variant Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductVariant {
    pub uuid: VariantUuid,
    pub product: ProductUuid,
    pub name: String,
    pub variant_type: String,
    pub price_adjustment: Decimal,
    pub stock_quantity: u32,
    pub sku_suffix: String,
    pub is_active: bool,
}

/// New Product Image Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductImage {
    pub uuid: ProductImageUuid,
    pub product: ProductUuid,
    pub url: String,
    pub alt_text: String,
    pub is_main: bool,
    pub position: i32,
}

/// Product listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Newest,
}

impl ProductSort {
    /// Parse a sort parameter. Unknown values sort by name.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("price_low") => Self::PriceLow,
            Some("price_high") => Self::PriceHigh,
            Some("newest") => Self::Newest,
            _ => Self::Name,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
            Self::Newest => "newest",
        }
    }
}

/// Product listing filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Matched case-insensitively against name, description and brand name.
    pub search: Option<String>,

    /// Category slug.
    pub category: Option<String>,

    pub sort: ProductSort,

    /// Raw page parameter, resolved against the result count.
    pub page: Option<String>,
}
