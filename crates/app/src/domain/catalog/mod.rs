//! Catalog

pub mod data;
pub mod errors;
pub mod pagination;
pub mod records;
pub mod slug;
pub(crate) mod repositories;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
