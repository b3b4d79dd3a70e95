//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Body parse failures and validation failures both reject with
/// `400 Bad Request` and a structured [`ErrorResponse`](crate::ErrorResponse).
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct EmbedRequest {
///     #[validate(required, length(min = 1))]
///     collection_name: Option<String>,
/// }
///
/// async fn embed(ValidatedJson(body): ValidatedJson<EmbedRequest>) -> String {
///     body.collection_name.unwrap_or_default()
/// }
///
/// let app: Router = Router::new().route("/embed", post(embed));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
