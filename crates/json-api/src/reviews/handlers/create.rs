//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::reviews::{
    data::NewReview,
    records::{ReviewRecord, ReviewUuid},
};

use crate::{errors::ApiError, extensions::*, reviews::errors::into_api_error, state::State};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    /// 1 to 5 stars
    pub rating: u8,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        NewReview {
            uuid: ReviewUuid::new(),
            rating: request.rating,
            title: request.title.trim().to_string(),
            body: request.body.trim().to_string(),
        }
    }
}

/// Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub username: String,
    pub rating: u8,
    pub title: String,
    pub body: String,
    pub is_verified_purchase: bool,
    pub helpful_count: u32,
    pub created_at: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            uuid: review.uuid.into_uuid(),
            username: review.username,
            rating: review.rating,
            title: review.title,
            body: review.body,
            is_verified_purchase: review.is_verified_purchase,
            helpful_count: review.helpful_count,
            created_at: review.created_at.to_string(),
        }
    }
}

/// Create Review Handler
#[endpoint(
    tags("reviews"),
    summary = "Review Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Already reviewed"),
    ),
)]
#[tracing::instrument(
    name = "reviews.create",
    skip(slug, json, depot, res),
    fields(user_uuid = tracing::field::Empty, product_slug = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let slug = slug.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_slug", tracing::field::display(&slug));

    let review = state
        .app
        .reviews
        .create_review(user, &slug, json.into_inner().into())
        .await
        .map_err(into_api_error)?;

    res.status_code(StatusCode::CREATED);

    tracing::info!(review_uuid = %review.uuid, rating = review.rating, "created review");

    Ok(Json(review.into()))
}
