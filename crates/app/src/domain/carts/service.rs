//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    accounts::records::UserUuid,
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{
                AddedCartItem, CartItemUuid, CartTotals, CartView, QuantityOutcome,
                UpdatedQuantity,
            },
            repositories::{PgCartItemsRepository, PgCartsRepository},
            rules::{self, LineLimits, QuantityChange},
        },
        catalog::repositories::{PgProductsRepository, PgVariantsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    variants_repository: PgVariantsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            variants_repository: PgVariantsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn view_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(cart) = self
            .carts_repository
            .find_cart_for_user(&mut tx, user)
            .await?
        else {
            return Ok(CartView::default());
        };

        let lines = self.items_repository.list_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        let totals = CartTotals::from_lines(&lines);

        Ok(CartView {
            cart_uuid: Some(cart.uuid),
            lines,
            totals,
        })
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            product_uuid = %item.product,
            quantity = item.quantity,
            cart_item_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<AddedCartItem, CartsServiceError> {
        if item.quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product(&mut tx, item.product)
            .await?;

        let available_stock = match item.variant {
            Some(variant) => {
                let variant = self
                    .variants_repository
                    .get_active_variant(&mut tx, variant)
                    .await?;

                if variant.product_uuid != product.uuid {
                    return Err(CartsServiceError::NotFound);
                }

                variant.stock_quantity
            }
            None => product.stock_quantity,
        };

        let limits = LineLimits {
            available_stock,
            max_order_quantity: product.max_order_quantity,
        };

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, user)
            .await?;

        let existing = self
            .items_repository
            .find_item(&mut tx, cart.uuid, product.uuid, item.variant)
            .await?;

        let quantity = rules::plan_add(
            item.quantity,
            existing.as_ref().map(|existing| existing.quantity),
            limits,
        )?;

        let stored = match existing {
            Some(existing) => {
                self.items_repository
                    .set_quantity(&mut tx, existing.uuid, quantity)
                    .await?
            }
            None => {
                self.items_repository
                    .create_item(&mut tx, cart.uuid, product.uuid, item.variant, quantity)
                    .await?
            }
        };

        Span::current().record("cart_item_uuid", tracing::field::display(stored.uuid));

        let lines = self.items_repository.list_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, quantity = stored.quantity, "added cart item");

        Ok(AddedCartItem {
            item: stored,
            totals: CartTotals::from_lines(&lines),
        })
    }

    #[tracing::instrument(
        name = "carts.service.update_quantity",
        skip(self),
        fields(user_uuid = %user, cart_item_uuid = %item),
        err
    )]
    async fn update_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<UpdatedQuantity, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .lock_cart_for_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let line = self
            .items_repository
            .get_line(&mut tx, cart.uuid, item)
            .await?;

        let change = rules::plan_update(
            quantity,
            LineLimits {
                available_stock: line.available_stock,
                max_order_quantity: line.max_order_quantity,
            },
        )?;

        match change {
            QuantityChange::Remove => {
                self.items_repository
                    .delete_item(&mut tx, cart.uuid, item)
                    .await?;
            }
            QuantityChange::Set(quantity) => {
                self.items_repository
                    .set_quantity(&mut tx, item, quantity)
                    .await?;
            }
        }

        let lines = self.items_repository.list_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        let outcome = match lines.iter().find(|line| line.item.uuid == item) {
            Some(line) => QuantityOutcome::Updated {
                item_total: line.line_total(),
            },
            None => QuantityOutcome::Removed,
        };

        info!(cart_uuid = %cart.uuid, ?outcome, "updated cart item quantity");

        Ok(UpdatedQuantity {
            outcome,
            totals: CartTotals::from_lines(&lines),
        })
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user_uuid = %user, cart_item_uuid = %item),
        err
    )]
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartTotals, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .lock_cart_for_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let lines = self.items_repository.list_lines(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, "removed cart item");

        Ok(CartTotals::from_lines(&lines))
    }

    #[tracing::instrument(name = "carts.service.clear_cart", skip(self), fields(user_uuid = %user), err)]
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(cart) = self
            .carts_repository
            .lock_cart_for_user(&mut tx, user)
            .await?
        else {
            return Ok(());
        };

        let removed = self.items_repository.clear(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, removed, "cleared cart");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The user's cart with priced lines. Never creates a cart.
    async fn view_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError>;

    /// Add a product, or one of its variants, to the user's cart.
    ///
    /// Adding a product/variant pair already in the cart accumulates onto the
    /// existing line, clamped to the product's maximum order quantity.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<AddedCartItem, CartsServiceError>;

    /// Overwrite a line's quantity. Zero or less removes the line.
    async fn update_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<UpdatedQuantity, CartsServiceError>;

    /// Remove a line from the user's cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<CartTotals, CartsServiceError>;

    /// Remove every line from the user's cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
