//! Reviews service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    accounts::records::UserUuid,
    database::Db,
    domain::{
        catalog::repositories::PgProductsRepository,
        reviews::{
            data::NewReview,
            errors::ReviewsServiceError,
            records::{ProductReviews, ReviewRecord},
            repository::PgReviewsRepository,
        },
    },
};

/// Reviews shown when listing a product's reviews.
pub const REVIEWS_PER_PRODUCT: i64 = 10;

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    products_repository: PgProductsRepository,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products_repository: PgProductsRepository::new(),
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn create_review(
        &self,
        user: UserUuid,
        product_slug: &str,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        if !review.has_valid_rating() {
            return Err(ReviewsServiceError::InvalidRating);
        }

        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product_by_slug(&mut tx, product_slug)
            .await?;

        let created = self
            .repository
            .create_review(&mut tx, product.uuid, user, review)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_reviews(&self, product_slug: &str) -> Result<ProductReviews, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product_by_slug(&mut tx, product_slug)
            .await?;

        let reviews = self
            .repository
            .list_approved_reviews(&mut tx, product.uuid, REVIEWS_PER_PRODUCT)
            .await?;

        let rating = self
            .repository
            .get_rating_summary(&mut tx, product.uuid)
            .await?;

        tx.commit().await?;

        Ok(ProductReviews { reviews, rating })
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Review an active product. Each user may review a product once.
    async fn create_review(
        &self,
        user: UserUuid,
        product_slug: &str,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Latest approved reviews of an active product, with its rating summary.
    async fn list_reviews(&self, product_slug: &str) -> Result<ProductReviews, ReviewsServiceError>;
}
