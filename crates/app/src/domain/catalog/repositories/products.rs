//! Products Repository

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar, types::Json,
};

use crate::domain::{
    catalog::{
        data::{NewProduct, ProductSort},
        pagination::Page,
        records::{BrandUuid, CategoryUuid, ProductRecord, ProductUuid},
    },
    rows::{count_param, try_get_count, try_get_percentage, try_get_timestamp},
};

const CREATE_PRODUCT_SQL: &str = include_str!("../sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("../sql/get_product.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("../sql/get_product_by_slug.sql");
const GET_PRODUCT_PRICE_SQL: &str = include_str!("../sql/get_product_price.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("../sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("../sql/count_products.sql");
const LIST_RELATED_PRODUCTS_SQL: &str = include_str!("../sql/list_related_products.sql");

/// Search and category filters shared by the count and page queries.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProductFilter<'a> {
    pub(crate) search: Option<&'a str>,
    pub(crate) category: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        let sku = product
            .sku
            .unwrap_or_else(|| product.uuid.into_uuid().simple().to_string());

        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.slug)
            .bind(sku)
            .bind(product.brand.into_uuid())
            .bind(product.category.into_uuid())
            .bind(product.description)
            .bind(product.short_description)
            .bind(Json(product.features))
            .bind(Json(product.specifications))
            .bind(product.price)
            .bind(product.original_price)
            .bind(i32::from(product.discount_percentage))
            .bind(count_param(product.stock_quantity, "stock_quantity")?)
            .bind(count_param(product.min_stock_level, "min_stock_level")?)
            .bind(count_param(product.max_order_quantity, "max_order_quantity")?)
            .bind(product.is_active)
            .bind(product.is_featured)
            .bind(product.is_bestseller)
            .bind(product.is_new_arrival)
            .bind(product.tags)
            .bind(product.weight)
            .bind(product.dimensions)
            .bind(product.free_shipping)
            .bind(product.shipping_class)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an active product by UUID.
    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an active product by slug.
    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    /// Base price of a product regardless of whether it is active.
    pub(crate) async fn get_product_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Decimal, sqlx::Error> {
        query_scalar::<Postgres, Decimal>(GET_PRODUCT_PRICE_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter<'_>,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_PRODUCTS_SQL)
            .bind(filter.search.map(escape_like))
            .bind(filter.category)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter<'_>,
        sort: ProductSort,
        page: Page,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(filter.search.map(escape_like))
            .bind(filter.category)
            .bind(sort.as_str())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    /// Other active products in the same category, newest first.
    pub(crate) async fn list_related_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &ProductRecord,
        limit: i64,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_RELATED_PRODUCTS_SQL)
            .bind(product.category_uuid.into_uuid())
            .bind(product.uuid.into_uuid())
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }
}

/// Escape `LIKE` wildcards so search text matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            sku: row.try_get("sku")?,
            brand_uuid: BrandUuid::from_uuid(row.try_get("brand_uuid")?),
            brand_name: row.try_get("brand_name")?,
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            category_name: row.try_get("category_name")?,
            category_slug: row.try_get("category_slug")?,
            description: row.try_get("description")?,
            short_description: row.try_get("short_description")?,
            features: row.try_get::<Json<Vec<String>>, _>("features")?.0,
            specifications: row.try_get::<Json<BTreeMap<String, String>>, _>("specifications")?.0,
            price: row.try_get("price")?,
            original_price: row.try_get("original_price")?,
            discount_percentage: try_get_percentage(row, "discount_percentage")?,
            stock_quantity: try_get_count(row, "stock_quantity")?,
            min_stock_level: try_get_count(row, "min_stock_level")?,
            max_order_quantity: try_get_count(row, "max_order_quantity")?,
            is_active: row.try_get("is_active")?,
            is_featured: row.try_get("is_featured")?,
            is_bestseller: row.try_get("is_bestseller")?,
            is_new_arrival: row.try_get("is_new_arrival")?,
            tags: row.try_get("tags")?,
            weight: row.try_get("weight")?,
            dimensions: row.try_get("dimensions")?,
            free_shipping: row.try_get("free_shipping")?,
            shipping_class: row.try_get("shipping_class")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50% off_now"), "50\\% off\\_now");
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
