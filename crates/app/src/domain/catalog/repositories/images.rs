//! Product Images Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    catalog::{
        data::NewProductImage,
        records::{ProductImageRecord, ProductImageUuid, ProductUuid},
    },
    rows::try_get_timestamp,
};

const CREATE_IMAGE_SQL: &str = include_str!("../sql/create_image.sql");
const DEMOTE_MAIN_IMAGES_SQL: &str = include_str!("../sql/demote_main_images.sql");
const LIST_IMAGES_SQL: &str = include_str!("../sql/list_images.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgImagesRepository;

impl PgImagesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an image. A main image demotes any previous main image first.
    pub(crate) async fn create_image(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        image: NewProductImage,
    ) -> Result<ProductImageRecord, sqlx::Error> {
        if image.is_main {
            query(DEMOTE_MAIN_IMAGES_SQL)
                .bind(image.product.into_uuid())
                .execute(&mut **tx)
                .await?;
        }

        query_as::<Postgres, ProductImageRecord>(CREATE_IMAGE_SQL)
            .bind(image.uuid.into_uuid())
            .bind(image.product.into_uuid())
            .bind(image.url)
            .bind(image.alt_text)
            .bind(image.is_main)
            .bind(image.position)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductImageRecord>, sqlx::Error> {
        query_as::<Postgres, ProductImageRecord>(LIST_IMAGES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductImageRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductImageUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            url: row.try_get("url")?,
            alt_text: row.try_get("alt_text")?,
            is_main: row.try_get("is_main")?,
            position: row.try_get("position")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
