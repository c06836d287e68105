//! Brands Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::{
        data::NewBrand,
        records::{BrandRecord, BrandUuid},
    },
    rows::try_get_timestamp,
};

const CREATE_BRAND_SQL: &str = include_str!("../sql/create_brand.sql");
const LIST_BRANDS_SQL: &str = include_str!("../sql/list_brands.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBrandsRepository;

impl PgBrandsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: NewBrand,
    ) -> Result<BrandRecord, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(CREATE_BRAND_SQL)
            .bind(brand.uuid.into_uuid())
            .bind(brand.name)
            .bind(brand.slug)
            .bind(brand.description)
            .bind(brand.website)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<BrandRecord>, sqlx::Error> {
        query_as::<Postgres, BrandRecord>(LIST_BRANDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BrandRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BrandUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            website: row.try_get("website")?,
            is_active: row.try_get("is_active")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
