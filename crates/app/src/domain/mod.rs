//! Storefront Domain Concerns

pub mod carts;
pub mod catalog;
pub mod pricing;
pub mod reviews;
pub(crate) mod rows;
pub mod wishlists;
