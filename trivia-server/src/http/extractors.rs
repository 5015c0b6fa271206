//! Custom Axum extractors
//!
//! Rejections surface as the service's own error envelope instead of
//! axum's plain-text defaults.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Parse a path segment as a non-negative integer id.
///
/// Signs, whitespace and overflow are rejected, so `/questions/-1` or
/// `/questions/abc` behave like unmatched routes.
fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

async fn id_from_path<S>(parts: &mut Parts, state: &S) -> Result<i64, ApiError>
where
    S: Send + Sync,
{
    let Path(raw): Path<String> = Path::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::NotFound.because(e))?;

    parse_id(&raw).ok_or(ApiError::NotFound)
}

/// Question id from `/questions/{id}`
pub struct QuestionId(pub i64);

impl<S> FromRequestParts<S> for QuestionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        id_from_path(parts, state).await.map(Self)
    }
}

/// Client-facing category id from `/categories/{id}/questions`
pub struct CategoryId(pub i64);

impl<S> FromRequestParts<S> for CategoryId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        id_from_path(parts, state).await.map(Self)
    }
}

/// JSON request body; any rejection becomes a 400 envelope.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest.because(e))?;
        Ok(Self(value))
    }
}

/// Query string; any rejection becomes a 400 envelope.
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest.because(e))?;
        Ok(Self(value))
    }
}
