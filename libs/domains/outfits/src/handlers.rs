use axum::{Json, Router, extract::State, extract::rejection::JsonRejection, routing::post};
use axum_helpers::{
    AppError,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{
    ClothingItem, ClothingType, Label, RecommendOutfitRequest, RecommendationResponse,
};
use crate::repository::ItemRepository;
use crate::service::RecommendationService;

/// OpenAPI documentation for the Recommendations API
#[derive(OpenApi)]
#[openapi(
    paths(recommend_outfit),
    components(
        schemas(
            RecommendOutfitRequest,
            RecommendationResponse,
            ClothingItem,
            ClothingType,
            Label
        ),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Recommendations", description = "Outfit recommendations from an uploaded photo")
    )
)]
pub struct ApiDoc;

/// Create the recommendations router
pub fn router<R: ItemRepository + 'static>(service: RecommendationService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(recommend_outfit))
        .with_state(shared_service)
}

/// Recommend a clothing item for an uploaded photo
///
/// The response carries `recommendation`, `recommendations` or `labels`
/// depending on the configured lookup strategy.
#[utoipa::path(
    post,
    path = "",
    tag = "Recommendations",
    request_body = RecommendOutfitRequest,
    responses(
        (status = 200, description = "Recommendation resolved", body = RecommendationResponse),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn recommend_outfit<R: ItemRepository>(
    State(service): State<Arc<RecommendationService<R>>>,
    payload: Result<Json<RecommendOutfitRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(input) = payload?;
    let recommendation = service.recommend(input).await?;
    Ok(Json(recommendation.into()))
}
