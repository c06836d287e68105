//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::{
        catalog::{
            data::{
                NewBrand, NewCategory, NewProduct, NewProductImage, NewProductVariant,
                ProductQuery,
            },
            errors::CatalogServiceError,
            pagination::{PRODUCTS_PER_PAGE, Page},
            records::{
                BrandRecord, CategoryRecord, ProductDetailsRecord, ProductImageRecord,
                ProductPage, ProductRecord, ProductUuid, ProductVariantRecord, VariantUuid,
            },
            repositories::{
                PgBrandsRepository, PgCategoriesRepository, PgImagesRepository,
                PgProductsRepository, PgVariantsRepository, ProductFilter,
            },
        },
        reviews::{repository::PgReviewsRepository, service::REVIEWS_PER_PRODUCT},
    },
};

/// Related products shown on a product page.
pub const RELATED_PRODUCTS_LIMIT: i64 = 6;

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    categories_repository: PgCategoriesRepository,
    brands_repository: PgBrandsRepository,
    products_repository: PgProductsRepository,
    variants_repository: PgVariantsRepository,
    images_repository: PgImagesRepository,
    reviews_repository: PgReviewsRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            categories_repository: PgCategoriesRepository::new(),
            brands_repository: PgBrandsRepository::new(),
            products_repository: PgProductsRepository::new(),
            variants_repository: PgVariantsRepository::new(),
            images_repository: PgImagesRepository::new(),
            reviews_repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .categories_repository
            .create_category(&mut tx, category)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.brands_repository.create_brand(&mut tx, brand).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .products_repository
            .create_product(&mut tx, product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_variant(
        &self,
        variant: NewProductVariant,
    ) -> Result<ProductVariantRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let price = self
            .products_repository
            .get_product_price(&mut tx, variant.product)
            .await?;

        if price + variant.price_adjustment < Decimal::ZERO {
            return Err(CatalogServiceError::NegativeFinalPrice);
        }

        let created = self
            .variants_repository
            .create_variant(&mut tx, variant)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn add_image(
        &self,
        image: NewProductImage,
    ) -> Result<ProductImageRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.images_repository.create_image(&mut tx, image).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.categories_repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn list_brands(&self) -> Result<Vec<BrandRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let brands = self.brands_repository.list_brands(&mut tx).await?;

        tx.commit().await?;

        Ok(brands)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.products_repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_variant(
        &self,
        variant: VariantUuid,
    ) -> Result<ProductVariantRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let variant = self
            .variants_repository
            .get_active_variant(&mut tx, variant)
            .await?;

        tx.commit().await?;

        Ok(variant)
    }

    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, CatalogServiceError> {
        let filter = ProductFilter {
            search: query.search.as_deref().filter(|search| !search.is_empty()),
            category: query.category.as_deref().filter(|slug| !slug.is_empty()),
        };

        let mut tx = self.db.begin_transaction().await?;

        let total_count = self
            .products_repository
            .count_products(&mut tx, filter)
            .await?;

        let page = Page::resolve(query.page.as_deref(), total_count, PRODUCTS_PER_PAGE);

        let products = self
            .products_repository
            .list_products(&mut tx, filter, query.sort, page)
            .await?;

        tx.commit().await?;

        Ok(ProductPage { products, page })
    }

    async fn get_product_details(
        &self,
        slug: &str,
    ) -> Result<ProductDetailsRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self
            .products_repository
            .get_product_by_slug(&mut tx, slug)
            .await?;

        let images = self
            .images_repository
            .list_images(&mut tx, product.uuid)
            .await?;

        let variants = self
            .variants_repository
            .list_active_variants(&mut tx, product.uuid)
            .await?;

        let reviews = self
            .reviews_repository
            .list_approved_reviews(&mut tx, product.uuid, REVIEWS_PER_PRODUCT)
            .await?;

        let rating = self
            .reviews_repository
            .get_rating_summary(&mut tx, product.uuid)
            .await?;

        let related = self
            .products_repository
            .list_related_products(&mut tx, &product, RELATED_PRODUCTS_LIMIT)
            .await?;

        tx.commit().await?;

        Ok(ProductDetailsRecord {
            product,
            images,
            variants,
            reviews,
            related,
            rating,
        })
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Creates a new brand.
    async fn create_brand(&self, brand: NewBrand) -> Result<BrandRecord, CatalogServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, CatalogServiceError>;

    /// Creates a product variant. The variant's final price may not be negative.
    async fn create_variant(
        &self,
        variant: NewProductVariant,
    ) -> Result<ProductVariantRecord, CatalogServiceError>;

    /// Attach an image to a product.
    async fn add_image(
        &self,
        image: NewProductImage,
    ) -> Result<ProductImageRecord, CatalogServiceError>;

    /// Active categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CatalogServiceError>;

    /// Active brands ordered by name.
    async fn list_brands(&self) -> Result<Vec<BrandRecord>, CatalogServiceError>;

    /// Retrieve a single active product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, CatalogServiceError>;

    /// Retrieve a single active variant.
    async fn get_variant(
        &self,
        variant: VariantUuid,
    ) -> Result<ProductVariantRecord, CatalogServiceError>;

    /// Filtered, sorted and paginated active products.
    async fn list_products(&self, query: ProductQuery) -> Result<ProductPage, CatalogServiceError>;

    /// An active product with its images, variants, reviews and related products.
    async fn get_product_details(
        &self,
        slug: &str,
    ) -> Result<ProductDetailsRecord, CatalogServiceError>;
}
