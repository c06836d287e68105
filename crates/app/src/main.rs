//! Storefront admin CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use storefront_app::{
    database::{self, Db},
    domain::catalog::{
        CatalogService, PgCatalogService,
        data::{DEFAULT_MAX_ORDER_QUANTITY, NewBrand, NewCategory, NewProduct},
        records::{BrandUuid, CategoryUuid, ProductUuid},
        slug::slugify,
    },
};

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront admin CLI", long_about = None)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending migrations
    Migrate,
    Category(CategoryCommand),
    Brand(BrandCommand),
    Product(ProductCommand),
}

#[derive(Debug, Args)]
struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Debug, Subcommand)]
enum CategorySubcommand {
    Create(CreateCategoryArgs),
}

#[derive(Debug, Args)]
struct CreateCategoryArgs {
    #[arg(long)]
    name: String,

    /// Derived from the name when omitted
    #[arg(long)]
    slug: Option<String>,

    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Debug, Args)]
struct BrandCommand {
    #[command(subcommand)]
    command: BrandSubcommand,
}

#[derive(Debug, Subcommand)]
enum BrandSubcommand {
    Create(CreateBrandArgs),
}

#[derive(Debug, Args)]
struct CreateBrandArgs {
    #[arg(long)]
    name: String,

    /// Derived from the name when omitted
    #[arg(long)]
    slug: Option<String>,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long)]
    website: Option<String>,
}

#[derive(Debug, Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    Create(CreateProductArgs),
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    #[arg(long)]
    name: String,

    /// Derived from the name when omitted
    #[arg(long)]
    slug: Option<String>,

    /// Category slug
    #[arg(long)]
    category: String,

    /// Brand slug
    #[arg(long)]
    brand: String,

    #[arg(long)]
    price: Decimal,

    #[arg(long)]
    original_price: Option<Decimal>,

    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    discount_percentage: u8,

    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long, default_value_t = DEFAULT_MAX_ORDER_QUANTITY)]
    max_order_quantity: u32,

    #[arg(long, default_value = "")]
    description: String,

    /// Repeat for each feature bullet
    #[arg(long = "feature")]
    features: Vec<String>,

    #[arg(long)]
    featured: bool,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let database_url = cli
        .database_url
        .ok_or_else(|| "DATABASE_URL or --database-url is required".to_string())?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    if matches!(cli.command, Commands::Migrate) {
        database::migrate(&pool)
            .await
            .map_err(|error| format!("failed to apply migrations: {error}"))?;

        println!("migrations applied");

        return Ok(());
    }

    let catalog = PgCatalogService::new(Db::new(pool));

    match cli.command {
        Commands::Migrate => Ok(()),
        Commands::Category(CategoryCommand {
            command: CategorySubcommand::Create(args),
        }) => create_category(&catalog, args).await,
        Commands::Brand(BrandCommand {
            command: BrandSubcommand::Create(args),
        }) => create_brand(&catalog, args).await,
        Commands::Product(ProductCommand {
            command: ProductSubcommand::Create(args),
        }) => create_product(&catalog, args).await,
    }
}

async fn create_category(catalog: &impl CatalogService, args: CreateCategoryArgs) -> Result<(), String> {
    let slug = args.slug.unwrap_or_else(|| slugify(&args.name));

    let category = catalog
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
            slug,
            description: args.description,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_slug: {}", category.slug);

    Ok(())
}

async fn create_brand(catalog: &impl CatalogService, args: CreateBrandArgs) -> Result<(), String> {
    let slug = args.slug.unwrap_or_else(|| slugify(&args.name));

    let brand = catalog
        .create_brand(NewBrand {
            uuid: BrandUuid::new(),
            name: args.name,
            slug,
            description: args.description,
            website: args.website,
        })
        .await
        .map_err(|error| format!("failed to create brand: {error}"))?;

    println!("brand_uuid: {}", brand.uuid);
    println!("brand_slug: {}", brand.slug);

    Ok(())
}

async fn create_product(catalog: &impl CatalogService, args: CreateProductArgs) -> Result<(), String> {
    let category = catalog
        .list_categories()
        .await
        .map_err(|error| format!("failed to load categories: {error}"))?
        .into_iter()
        .find(|category| category.slug == args.category)
        .ok_or_else(|| format!("no active category with slug '{}'", args.category))?;

    let brand = catalog
        .list_brands()
        .await
        .map_err(|error| format!("failed to load brands: {error}"))?
        .into_iter()
        .find(|brand| brand.slug == args.brand)
        .ok_or_else(|| format!("no active brand with slug '{}'", args.brand))?;

    let slug = args.slug.unwrap_or_else(|| slugify(&args.name));

    let product = catalog
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            slug,
            category: category.uuid,
            brand: brand.uuid,
            description: args.description,
            features: args.features,
            price: args.price,
            original_price: args.original_price,
            discount_percentage: args.discount_percentage,
            stock_quantity: args.stock,
            max_order_quantity: args.max_order_quantity,
            is_featured: args.featured,
            ..NewProduct::default()
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_slug: {}", product.slug);
    println!("product_sku: {}", product.sku);

    Ok(())
}
