//! Wishlists Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    accounts::records::UserUuid,
    domain::{
        catalog::records::{ProductRecord, ProductUuid},
        rows::try_get_timestamp,
        wishlists::records::{WishlistEntryRecord, WishlistItemUuid, WishlistRecord, WishlistUuid},
    },
};

const GET_OR_CREATE_WISHLIST_SQL: &str = include_str!("sql/get_or_create_wishlist.sql");
const ADD_WISHLIST_ITEM_SQL: &str = include_str!("sql/add_wishlist_item.sql");
const REMOVE_WISHLIST_ITEM_SQL: &str = include_str!("sql/remove_wishlist_item.sql");
const LIST_WISHLIST_ITEMS_SQL: &str = include_str!("sql/list_wishlist_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWishlistsRepository;

impl PgWishlistsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_or_create_wishlist(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<WishlistRecord, sqlx::Error> {
        query_as::<Postgres, WishlistRecord>(GET_OR_CREATE_WISHLIST_SQL)
            .bind(WishlistUuid::new().into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `false` when the product was already on the wishlist.
    pub(crate) async fn add_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wishlist: WishlistUuid,
        product: ProductUuid,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(ADD_WISHLIST_ITEM_SQL)
            .bind(WishlistItemUuid::new().into_uuid())
            .bind(wishlist.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    pub(crate) async fn remove_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REMOVE_WISHLIST_ITEM_SQL)
            .bind(user.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Active wishlisted products, most recently added first.
    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<WishlistEntryRecord>, sqlx::Error> {
        query_as::<Postgres, WishlistEntryRecord>(LIST_WISHLIST_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WishlistUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for WishlistEntryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: WishlistItemUuid::from_uuid(row.try_get("item_uuid")?),
            product: ProductRecord::from_row(row)?,
            added_at: try_get_timestamp(row, "added_at")?,
        })
    }
}
