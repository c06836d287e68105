//! User accounts and sessions.

pub mod config;
pub mod data;
pub mod errors;
pub mod forms;
pub mod passwords;
pub mod records;
mod repository;
pub mod service;
pub mod token;
pub mod validation;

pub use config::AccountsConfig;
pub use errors::AccountsServiceError;
pub use service::*;
pub use validation::ValidationErrors;
