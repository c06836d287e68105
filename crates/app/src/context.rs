//! App Context

use std::sync::Arc;

use crate::{
    accounts::{AccountsConfig, AccountsService, PgAccountsService},
    database::Db,
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        reviews::{PgReviewsService, ReviewsService},
        wishlists::{PgWishlistsService, WishlistsService},
    },
};

/// Services shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub wishlists: Arc<dyn WishlistsService>,
    pub accounts: Arc<dyn AccountsService>,
}

impl AppContext {
    /// Wire the Postgres-backed services onto one database handle.
    #[must_use]
    pub fn from_db(db: &Db, accounts: AccountsConfig) -> Self {
        Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            wishlists: Arc::new(PgWishlistsService::new(db.clone())),
            accounts: Arc::new(PgAccountsService::new(db.clone(), accounts)),
        }
    }

}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
