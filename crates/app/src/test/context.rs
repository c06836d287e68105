//! Test context for service-level integration tests.

use sqlx::query;

use crate::{
    accounts::{AccountsConfig, PgAccountsService, records::UserUuid},
    database::Db,
    domain::{
        carts::PgCartsService,
        catalog::{
            CatalogService, CatalogServiceError, PgCatalogService,
            data::{NewBrand, NewCategory, NewProduct},
            records::{BrandRecord, BrandUuid, CategoryRecord, CategoryUuid, ProductRecord, ProductUuid},
            slug::slugify,
        },
        reviews::PgReviewsService,
        wishlists::PgWishlistsService,
    },
};

use super::{db::TestDb, helpers::price};

pub(crate) struct TestContext {
    pub db: TestDb,
    pub catalog: PgCatalogService,
    pub carts: PgCartsService,
    pub reviews: PgReviewsService,
    pub wishlists: PgWishlistsService,
    pub accounts: PgAccountsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let config = AccountsConfig::standard().expect("account patterns compile");

        Self {
            catalog: PgCatalogService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            reviews: PgReviewsService::new(db.clone()),
            wishlists: PgWishlistsService::new(db.clone()),
            accounts: PgAccountsService::new(db, config),
            db: test_db,
        }
    }

    /// Insert an active user directly, skipping form validation and hashing.
    pub async fn create_user(&self, username: &str) -> Result<UserUuid, sqlx::Error> {
        let uuid = UserUuid::new();

        query(
            "INSERT INTO users (uuid, email, username, first_name, last_name, password_hash) \
             VALUES ($1, $2, $3, 'Test', 'User', 'unusable')",
        )
        .bind(uuid.into_uuid())
        .bind(format!("{username}@example.com"))
        .bind(username)
        .execute(self.db.pool())
        .await?;

        Ok(uuid)
    }

    pub async fn deactivate_user(&self, user: UserUuid) -> Result<(), sqlx::Error> {
        query("UPDATE users SET is_active = FALSE WHERE uuid = $1")
            .bind(user.into_uuid())
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    pub async fn create_category(&self, name: &str) -> Result<CategoryRecord, CatalogServiceError> {
        self.catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: name.to_string(),
                slug: slugify(name),
                description: String::new(),
            })
            .await
    }

    pub async fn create_brand(&self, name: &str) -> Result<BrandRecord, CatalogServiceError> {
        self.catalog
            .create_brand(NewBrand {
                uuid: BrandUuid::new(),
                name: name.to_string(),
                slug: slugify(name),
                description: String::new(),
                website: None,
            })
            .await
    }

    /// Product data with the given price and stock, everything else defaulted.
    pub fn new_product(
        &self,
        name: &str,
        unit_price: &str,
        stock_quantity: u32,
        category: &CategoryRecord,
        brand: &BrandRecord,
    ) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            slug: slugify(name),
            category: category.uuid,
            brand: brand.uuid,
            price: price(unit_price),
            stock_quantity,
            ..NewProduct::default()
        }
    }

    /// Create a product in its own category and brand.
    pub async fn create_product(
        &self,
        name: &str,
        unit_price: &str,
        stock_quantity: u32,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let category = self.create_category(&format!("{name} Category")).await?;
        let brand = self.create_brand(&format!("{name} Brand")).await?;

        self.catalog
            .create_product(self.new_product(name, unit_price, stock_quantity, &category, &brand))
            .await
    }
}
