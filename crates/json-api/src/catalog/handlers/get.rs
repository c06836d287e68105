//! Get Product Handler

use std::{collections::BTreeMap, sync::Arc};

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    catalog::records::{
        ProductDetailsRecord, ProductImageRecord, ProductRecord, ProductVariantRecord,
    },
    pricing::format_amount,
    reviews::rating::RatingSummary,
};

use crate::{
    catalog::errors::into_status_error, extensions::*, reviews::create::ReviewResponse,
    state::State,
};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub brand: String,
    pub category: String,
    pub category_slug: String,
    pub short_description: String,

    /// Decimal string with two places
    pub price: String,

    pub original_price: Option<String>,
    pub discount_percentage: u8,
    pub discount_amount: String,
    pub stock_quantity: u32,
    pub max_order_quantity: u32,
    pub is_in_stock: bool,
    pub is_low_stock: bool,
    pub is_featured: bool,
    pub is_bestseller: bool,
    pub is_new_arrival: bool,
    pub free_shipping: bool,
    pub tags: Vec<String>,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            price: format_amount(product.price),
            original_price: product.original_price.map(format_amount),
            discount_amount: format_amount(product.discount_amount()),
            is_in_stock: product.is_in_stock(),
            is_low_stock: product.is_low_stock(),
            tags: product.tag_list().map(str::to_string).collect(),
            name: product.name,
            slug: product.slug,
            sku: product.sku,
            brand: product.brand_name,
            category: product.category_name,
            category_slug: product.category_slug,
            short_description: product.short_description,
            discount_percentage: product.discount_percentage,
            stock_quantity: product.stock_quantity,
            max_order_quantity: product.max_order_quantity,
            is_featured: product.is_featured,
            is_bestseller: product.is_bestseller,
            is_new_arrival: product.is_new_arrival,
            free_shipping: product.free_shipping,
        }
    }
}

/// Product Image Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductImageResponse {
    pub url: String,
    pub alt_text: String,
    pub is_main: bool,
}

impl From<ProductImageRecord> for ProductImageResponse {
    fn from(image: ProductImageRecord) -> Self {
        Self {
            url: image.url,
            alt_text: image.alt_text,
            is_main: image.is_main,
        }
    }
}

/// Product Variant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductVariantResponse {
    pub uuid: Uuid,
    pub name: String,
    pub variant_type: String,
    pub price_adjustment: String,

    /// Product price plus adjustment, never below zero
    pub final_price: String,

    pub stock_quantity: u32,
    pub sku_suffix: String,
}

impl ProductVariantResponse {
    fn new(variant: ProductVariantRecord, product_price: Decimal) -> Self {
        Self {
            uuid: variant.uuid.into_uuid(),
            final_price: format_amount(variant.final_price(product_price)),
            price_adjustment: format_amount(variant.price_adjustment),
            name: variant.name,
            variant_type: variant.variant_type,
            stock_quantity: variant.stock_quantity,
            sku_suffix: variant.sku_suffix,
        }
    }
}

/// Rating Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RatingResponse {
    /// Mean of approved ratings; "0.00" without reviews
    pub average: String,
    pub count: u32,
}

impl From<RatingSummary> for RatingResponse {
    fn from(rating: RatingSummary) -> Self {
        Self {
            average: format_amount(rating.average),
            count: rating.count,
        }
    }
}

/// Product Details Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailsResponse {
    pub product: ProductResponse,
    pub description: String,
    pub features: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub weight: Option<String>,
    pub dimensions: String,
    pub shipping_class: String,
    pub main_image_url: Option<String>,
    pub images: Vec<ProductImageResponse>,
    pub variants: Vec<ProductVariantResponse>,
    pub reviews: Vec<ReviewResponse>,
    pub rating: RatingResponse,
    pub related: Vec<ProductResponse>,
}

impl From<ProductDetailsRecord> for ProductDetailsResponse {
    fn from(details: ProductDetailsRecord) -> Self {
        let main_image_url = details.main_image_url().map(str::to_string);
        let price = details.product.price;

        Self {
            description: details.product.description.clone(),
            features: details.product.features.clone(),
            specifications: details.product.specifications.clone(),
            weight: details.product.weight.map(|weight| weight.to_string()),
            dimensions: details.product.dimensions.clone(),
            shipping_class: details.product.shipping_class.clone(),
            product: details.product.into(),
            main_image_url,
            images: details.images.into_iter().map(Into::into).collect(),
            variants: details
                .variants
                .into_iter()
                .map(|variant| ProductVariantResponse::new(variant, price))
                .collect(),
            reviews: details.reviews.into_iter().map(Into::into).collect(),
            rating: details.rating.into(),
            related: details.related.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Product Handler
///
/// Returns an active product with its images, variants, latest reviews and
/// related products.
#[endpoint(
    tags("catalog"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let details = state
        .app
        .catalog
        .get_product_details(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(details.into()))
}
