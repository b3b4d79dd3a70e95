use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{BadRequestValidationResponse, UpstreamErrorResponse},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ChatError, ChatResult};
use crate::models::{ChatRequest, ChatResponse};
use crate::repository::HistoryRepository;
use crate::service::ChatService;

/// OpenAPI documentation for the chat API
#[derive(OpenApi)]
#[openapi(
    paths(chat),
    components(
        schemas(ChatRequest, ChatResponse),
        responses(BadRequestValidationResponse, UpstreamErrorResponse)
    ),
    tags(
        (name = "Chat", description = "Conversational property recommendations")
    )
)]
pub struct ApiDoc;

/// Router exposing `POST /chat`
pub fn router<H: HistoryRepository + 'static>(service: ChatService<H>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/chat", post(chat))
        .with_state(shared_service)
}

/// Ask the assistant a question within a session
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = UpstreamErrorResponse)
    )
)]
async fn chat<H: HistoryRepository>(
    State(service): State<Arc<ChatService<H>>>,
    ValidatedJson(input): ValidatedJson<ChatRequest>,
) -> ChatResult<Json<ChatResponse>> {
    let (Some(session_id), Some(email), Some(question)) =
        (input.session_id, input.email, input.question)
    else {
        return Err(ChatError::Validation(
            "session_id, email, and question are required fields.".to_string(),
        ));
    };

    let response = service.handle(&email, &session_id, &question).await?;
    Ok(Json(ChatResponse { response }))
}
