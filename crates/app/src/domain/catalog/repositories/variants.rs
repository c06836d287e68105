//! Product Variants Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::{
        data::NewProductVariant,
        records::{ProductUuid, ProductVariantRecord, VariantUuid},
    },
    rows::{count_param, try_get_count, try_get_timestamp},
};

const CREATE_VARIANT_SQL: &str = include_str!("../sql/create_variant.sql");
const GET_ACTIVE_VARIANT_SQL: &str = include_str!("../sql/get_active_variant.sql");
const LIST_ACTIVE_VARIANTS_SQL: &str = include_str!("../sql/list_active_variants.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVariantsRepository;

impl PgVariantsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: NewProductVariant,
    ) -> Result<ProductVariantRecord, sqlx::Error> {
        query_as::<Postgres, ProductVariantRecord>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.product.into_uuid())
            .bind(variant.name)
            .bind(variant.variant_type)
            .bind(variant.price_adjustment)
            .bind(count_param(variant.stock_quantity, "stock_quantity")?)
            .bind(variant.sku_suffix)
            .bind(variant.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_active_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: VariantUuid,
    ) -> Result<ProductVariantRecord, sqlx::Error> {
        query_as::<Postgres, ProductVariantRecord>(GET_ACTIVE_VARIANT_SQL)
            .bind(variant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_active_variants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductVariantRecord>, sqlx::Error> {
        query_as::<Postgres, ProductVariantRecord>(LIST_ACTIVE_VARIANTS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductVariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            variant_type: row.try_get("variant_type")?,
            price_adjustment: row.try_get("price_adjustment")?,
            stock_quantity: try_get_count(row, "stock_quantity")?,
            sku_suffix: row.try_get("sku_suffix")?,
            is_active: row.try_get("is_active")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
