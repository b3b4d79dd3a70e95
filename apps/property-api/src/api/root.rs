//! Service status routes

use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "Service is running")]
    status: &'static str,
}

pub fn router() -> Router {
    Router::new().route("/", get(status).post(welcome))
}

/// Report that the service is up
#[utoipa::path(
    get,
    path = "/",
    tag = "Service",
    responses((status = 200, description = "Service is running", body = StatusResponse))
)]
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Service is running",
    })
}

/// Plain-text greeting
#[utoipa::path(
    post,
    path = "/",
    tag = "Service",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain"))
)]
pub async fn welcome() -> &'static str {
    "welcome to the chatbot api"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn send(method: &str) -> (StatusCode, Vec<u8>) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_get_root_reports_running() {
        let (status, body) = send("GET").await;
        assert_eq!(status, StatusCode::OK);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "Service is running" }));
    }

    #[tokio::test]
    async fn test_post_root_welcomes() {
        let (status, body) = send("POST").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"welcome to the chatbot api");
    }
}
