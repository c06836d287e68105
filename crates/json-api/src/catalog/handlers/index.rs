//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::catalog::{
    data::{ProductQuery, ProductSort},
    pagination::Page,
};

use crate::{
    catalog::{errors::into_status_error, get::ProductResponse},
    extensions::*,
    state::State,
};

/// Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PageResponse {
    pub number: u32,
    pub num_pages: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            number: page.number,
            num_pages: page.num_pages,
            per_page: page.per_page,
            total_count: page.total_count,
            has_next: page.has_next(),
            has_previous: page.has_previous(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Products on the requested page
    pub products: Vec<ProductResponse>,

    pub page: PageResponse,

    pub search: Option<String>,
    pub category: Option<String>,

    /// Sort actually applied
    pub sort: String,
}

/// Product Index Handler
///
/// Lists active products. `search` matches name, description and brand
/// name; `category` is a category slug; `sort` is one of `name`,
/// `price_low`, `price_high` or `newest`. Pages hold twelve products; an
/// unparsable page gives the first page and an out-of-range page the last.
#[endpoint(tags("catalog"), summary = "List Products")]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    category: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    page: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let query = ProductQuery {
        search: search
            .into_inner()
            .map(|search| search.trim().to_string())
            .filter(|search| !search.is_empty()),
        category: category.into_inner().filter(|slug| !slug.is_empty()),
        sort: ProductSort::from_param(sort.into_inner().as_deref()),
        page: page.into_inner(),
    };

    let search = query.search.clone();
    let category = query.category.clone();
    let sort = query.sort;

    let listing = state
        .app
        .catalog
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: listing.products.into_iter().map(Into::into).collect(),
        page: listing.page.into(),
        search,
        category,
        sort: sort.as_str().to_string(),
    }))
}
