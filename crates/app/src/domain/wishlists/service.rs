//! Wishlists service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    accounts::records::UserUuid,
    database::Db,
    domain::{
        catalog::{records::ProductUuid, repositories::PgProductsRepository},
        wishlists::{
            errors::WishlistsServiceError, records::WishlistEntryRecord,
            repository::PgWishlistsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistsService {
    db: Db,
    products_repository: PgProductsRepository,
    repository: PgWishlistsRepository,
}

impl PgWishlistsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            products_repository: PgProductsRepository::new(),
            repository: PgWishlistsRepository::new(),
        }
    }
}

#[async_trait]
impl WishlistsService for PgWishlistsService {
    async fn list_items(
        &self,
        user: UserUuid,
    ) -> Result<Vec<WishlistEntryRecord>, WishlistsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.repository.list_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    #[tracing::instrument(
        name = "wishlists.service.add_product",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn add_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, WishlistsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.products_repository.get_product(&mut tx, product).await?;

        let wishlist = self.repository.get_or_create_wishlist(&mut tx, user).await?;

        let added = self
            .repository
            .add_item(&mut tx, wishlist.uuid, product.uuid)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user, product_uuid = %product.uuid, added, "wishlisted product");

        Ok(added)
    }

    #[tracing::instrument(
        name = "wishlists.service.remove_product",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product),
        err
    )]
    async fn remove_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.remove_item(&mut tx, user, product).await?;

        if rows_affected == 0 {
            return Err(WishlistsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait WishlistsService: Send + Sync {
    /// Active products on the user's wishlist, newest first.
    async fn list_items(
        &self,
        user: UserUuid,
    ) -> Result<Vec<WishlistEntryRecord>, WishlistsServiceError>;

    /// Wishlist an active product. Returns `false` if it was already there.
    async fn add_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<bool, WishlistsServiceError>;

    /// Take a product off the user's wishlist.
    async fn remove_product(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<(), WishlistsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use testresult::TestResult;
    use tracing::{Subscriber, span};
    use tracing_subscriber::{
        Layer,
        layer::{Context, SubscriberExt},
        registry::LookupSpan,
    };

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn adding_twice_keeps_one_entry() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper").await?;
        let product = ctx.create_product("Desk Lamp", "24.99", 10).await?;

        assert!(ctx.wishlists.add_product(user, product.uuid).await?);
        assert!(!ctx.wishlists.add_product(user, product.uuid).await?);

        let items = ctx.wishlists.list_items(user).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.uuid, product.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper").await?;

        let result = ctx.wishlists.add_product(user, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(WishlistsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn removing_takes_product_off_only_own_list() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("owner").await?;
        let other = ctx.create_user("other").await?;
        let product = ctx.create_product("Desk Lamp", "24.99", 10).await?;

        ctx.wishlists.add_product(owner, product.uuid).await?;

        let result = ctx.wishlists.remove_product(other, product.uuid).await;

        assert!(
            matches!(result, Err(WishlistsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        ctx.wishlists.remove_product(owner, product.uuid).await?;

        assert!(ctx.wishlists.list_items(owner).await?.is_empty());

        Ok(())
    }

    #[derive(Clone, Default)]
    struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

    impl<S> Layer<S> for SpanNames
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(&self, attrs: &span::Attributes<'_>, _id: &span::Id, _ctx: Context<'_, S>) {
            if let Ok(mut names) = self.0.lock() {
                names.push(attrs.metadata().name());
            }
        }
    }

    #[tokio::test]
    async fn wishlist_mutations_open_service_spans() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("shopper").await?;
        let product = ctx.create_product("Desk Lamp", "24.99", 10).await?;

        let names = SpanNames::default();
        let _guard =
            tracing::subscriber::set_default(tracing_subscriber::registry().with(names.clone()));

        ctx.wishlists.add_product(user, product.uuid).await?;
        ctx.wishlists.remove_product(user, product.uuid).await?;

        let names = names.0.lock().map_err(|e| e.to_string())?.clone();

        assert!(names.contains(&"wishlists.service.add_product"), "spans: {names:?}");
        assert!(names.contains(&"wishlists.service.remove_product"), "spans: {names:?}");

        Ok(())
    }
}
