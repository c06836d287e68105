//! Reviews Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    accounts::records::UserUuid,
    domain::{
        catalog::records::ProductUuid,
        reviews::{
            data::NewReview,
            rating::RatingSummary,
            records::{ReviewRecord, ReviewUuid},
        },
        rows::{try_get_count, try_get_timestamp},
    },
};

const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LIST_APPROVED_REVIEWS_SQL: &str = include_str!("sql/list_approved_reviews.sql");
const GET_RATING_TOTALS_SQL: &str = include_str!("sql/get_rating_totals.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(product.into_uuid())
            .bind(user.into_uuid())
            .bind(i16::from(review.rating))
            .bind(review.title)
            .bind(review.body)
            .fetch_one(&mut **tx)
            .await
    }

    /// Most recent approved reviews first.
    pub(crate) async fn list_approved_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        limit: i64,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_APPROVED_REVIEWS_SQL)
            .bind(product.into_uuid())
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_rating_summary(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<RatingSummary, sqlx::Error> {
        let (count, total): (i64, i64) = query_as(GET_RATING_TOTALS_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let count = u32::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "review_count".to_string(),
            source: Box::new(e),
        })?;

        let total = u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating_total".to_string(),
            source: Box::new(e),
        })?;

        Ok(RatingSummary::from_totals(count, total))
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating: i16 = row.try_get("rating")?;

        let rating = u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            username: row.try_get("username")?,
            rating,
            title: row.try_get("title")?,
            body: row.try_get("body")?,
            is_approved: row.try_get("is_approved")?,
            is_verified_purchase: row.try_get("is_verified_purchase")?,
            helpful_count: try_get_count(row, "helpful_count")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
