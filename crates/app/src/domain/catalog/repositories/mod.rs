//! Catalog Repositories

mod brands;
mod categories;
mod images;
mod products;
mod variants;

pub(crate) use brands::PgBrandsRepository;
pub(crate) use categories::PgCategoriesRepository;
pub(crate) use images::PgImagesRepository;
pub(crate) use products::PgProductsRepository;
pub(crate) use products::ProductFilter;
pub(crate) use variants::PgVariantsRepository;
