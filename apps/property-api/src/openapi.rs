//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::root;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Property Recommendation API",
        version = "0.1.0",
        description = "Conversational property recommendations backed by MongoDB vector search"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(root::status, root::welcome),
    tags(
        (name = "Service", description = "Service status")
    )
)]
struct ServiceDoc;

/// Combined documentation: service routes plus every domain's routes
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_chat::ApiDoc::openapi());
        doc.merge(domain_listings::ApiDoc::openapi());
        doc
    }
}
