//! Catalog Handlers

pub(crate) mod brands;
pub(crate) mod categories;
pub(crate) mod get;
pub(crate) mod index;
