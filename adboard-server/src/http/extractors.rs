//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde_json::Value;

use adboard_core::{AdId, ValidationError};

use super::error::ApiError;

/// Extract an ad id from the path.
///
/// Only plain decimal digits that fit an `AdId` match; anything else is
/// reported as a missing ad rather than a bad request.
pub struct ValidAdId(pub AdId);

impl<S> FromRequestParts<S> for ValidAdId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound { id: None })?;

        parse_ad_id(&raw)
            .map(Self)
            .ok_or(ApiError::NotFound { id: None })
    }
}

fn parse_ad_id(raw: &str) -> Option<AdId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Untrusted JSON body, handed to the validation layer as-is.
///
/// Parse failures (bad syntax, wrong content type) become a `__root__`
/// validation error instead of axum's plain-text rejection.
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::from(ValidationError::MalformedBody {
                    reason: rejection.body_text(),
                })
            })?;
        Ok(Self(value))
    }
}
