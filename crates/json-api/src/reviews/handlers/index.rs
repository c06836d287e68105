//! Review Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    catalog::get::RatingResponse, errors::ApiError, extensions::*,
    reviews::{create::ReviewResponse, errors::into_api_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewsResponse {
    /// Latest approved reviews
    pub reviews: Vec<ReviewResponse>,
    pub rating: RatingResponse,
}

/// Review Index Handler
#[endpoint(tags("reviews"), summary = "List Product Reviews")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ReviewsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let listing = state
        .app
        .reviews
        .list_reviews(&slug.into_inner())
        .await
        .map_err(into_api_error)?;

    Ok(Json(ReviewsResponse {
        reviews: listing.reviews.into_iter().map(Into::into).collect(),
        rating: listing.rating.into(),
    }))
}
