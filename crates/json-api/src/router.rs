//! App Router

use salvo::Router;

use crate::{accounts, auth, carts, catalog, reviews, wishlists};

/// Routes open to anonymous callers.
fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("accounts/signup").post(accounts::signup::handler))
        .push(Router::with_path("accounts/login").post(accounts::login::handler))
        .push(Router::with_path("categories").get(catalog::categories::handler))
        .push(Router::with_path("brands").get(catalog::brands::handler))
        .push(
            Router::with_path("products")
                .get(catalog::index::handler)
                .push(
                    Router::with_path("{slug}")
                        .get(catalog::get::handler)
                        .push(Router::with_path("reviews").get(reviews::index::handler)),
                ),
        )
}

/// Routes requiring a session token.
fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("accounts/logout").post(accounts::logout::handler))
        .push(
            Router::with_path("accounts/profile")
                .get(accounts::profile::handler)
                .put(accounts::update_profile::handler),
        )
        .push(Router::with_path("products/{slug}/reviews").post(reviews::create::handler))
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(Router::with_path("add").post(carts::add::handler))
                .push(Router::with_path("update-quantity").post(carts::update_quantity::handler))
                .push(Router::with_path("remove").post(carts::remove::handler))
                .push(Router::with_path("clear").post(carts::clear::handler)),
        )
        .push(
            Router::with_path("wishlist")
                .get(wishlists::get::handler)
                .push(Router::with_path("add").post(wishlists::add::handler))
                .push(Router::with_path("remove").post(wishlists::remove::handler)),
        )
}

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(authenticated_router())
}
