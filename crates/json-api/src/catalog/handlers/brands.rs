//! Brand Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::catalog::records::BrandRecord;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

/// Brand Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
}

impl From<BrandRecord> for BrandResponse {
    fn from(brand: BrandRecord) -> Self {
        Self {
            uuid: brand.uuid.into_uuid(),
            name: brand.name,
            slug: brand.slug,
            description: brand.description,
            website: brand.website,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandsResponse {
    /// Active brands ordered by name
    pub brands: Vec<BrandResponse>,
}

/// Brand Index Handler
#[endpoint(tags("catalog"), summary = "List Brands")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BrandsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brands = state
        .app
        .catalog
        .list_brands()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandsResponse {
        brands: brands.into_iter().map(Into::into).collect(),
    }))
}
