//! Catalog Records

use std::collections::BTreeMap;

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        catalog::pagination::Page,
        pricing,
        reviews::{rating::RatingSummary, records::ReviewRecord},
    },
    uuids::TypedUuid,
};

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Brand UUID
pub type BrandUuid = TypedUuid<BrandRecord>;

/// Brand Record
#[derive(Debug, Clone)]
pub struct BrandRecord {
    pub uuid: BrandUuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record, joined with its brand and category names.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub brand_uuid: BrandUuid,
    pub brand_name: String,
    pub category_uuid: CategoryUuid,
    pub category_name: String,
    pub category_slug: String,
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
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductRecord {
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }

    #[must_use]
    pub fn discount_amount(&self) -> Decimal {
        pricing::discount_amount(self.original_price, self.discount_percentage)
    }

    /// Comma separated tags, trimmed, empty entries dropped.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }
}

/// Product Image UUID
pub type ProductImageUuid = TypedUuid<ProductImageRecord>;

/// Product Image Record
#[derive(Debug, Clone)]
pub struct ProductImageRecord {
    pub uuid: ProductImageUuid,
    pub product_uuid: ProductUuid,
    pub url: String,
    pub alt_text: String,
    pub is_main: bool,
    pub position: i32,
    pub created_at: Timestamp,
}

/// Product Variant UUID
pub type VariantUuid = TypedUuid<ProductVariantRecord>;

/// Product Variant Record
#[derive(Debug, Clone)]
pub struct ProductVariantRecord {
    pub uuid: VariantUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub variant_type: String,
    pub price_adjustment: Decimal,
    pub stock_quantity: u32,
    pub sku_suffix: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl ProductVariantRecord {
    #[must_use]
    pub fn final_price(&self, product_price: Decimal) -> Decimal {
        pricing::variant_final_price(product_price, self.price_adjustment)
    }
}

/// Everything shown on a product page.
#[derive(Debug, Clone)]
pub struct ProductDetailsRecord {
    pub product: ProductRecord,
    pub images: Vec<ProductImageRecord>,
    pub variants: Vec<ProductVariantRecord>,
    pub reviews: Vec<ReviewRecord>,
    pub related: Vec<ProductRecord>,
    pub rating: RatingSummary,
}

impl ProductDetailsRecord {
    /// URL of the image flagged as main, if any.
    #[must_use]
    pub fn main_image_url(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|image| image.is_main)
            .map(|image| image.url.as_str())
    }
}

/// One page of a product listing.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub page: Page,
}
