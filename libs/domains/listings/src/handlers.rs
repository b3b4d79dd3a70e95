use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{BadRequestValidationResponse, UpstreamErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ListingError, ListingResult};
use crate::models::{EmbedRequest, EmbedResponse};
use crate::repository::ListingRepository;
use crate::service::ListingService;

/// OpenAPI documentation for the listings API
#[derive(OpenApi)]
#[openapi(
    paths(embed_collection),
    components(
        schemas(EmbedRequest, EmbedResponse),
        responses(BadRequestValidationResponse, UpstreamErrorResponse)
    ),
    tags(
        (name = "Listings", description = "Listing embedding maintenance")
    )
)]
pub struct ApiDoc;

/// Router exposing `POST /embed`
pub fn router<R: ListingRepository + 'static>(service: ListingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/embed", post(embed_collection))
        .with_state(shared_service)
}

/// Compute embeddings for every record of a collection that lacks one
#[utoipa::path(
    post,
    path = "/embed",
    tag = "Listings",
    request_body = EmbedRequest,
    responses(
        (status = 200, description = "Sync finished", body = EmbedResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = UpstreamErrorResponse)
    )
)]
async fn embed_collection<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    ValidatedJson(input): ValidatedJson<EmbedRequest>,
) -> ListingResult<Json<EmbedResponse>> {
    let collection = input
        .collection_name
        .ok_or_else(|| ListingError::Validation("Collection name is required".to_string()))?;

    let report = service.sync_embeddings(&collection).await?;
    Ok(Json(EmbedResponse::from(&report)))
}
