//! Ad endpoints
//!
//! POST /user/, GET|PATCH|DELETE /user/{id}

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use adboard_core::{Ad, AdId, AdPatch, NewAd};

use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidAdId};
use crate::http::server::AppState;

/// Ad as returned by GET
#[derive(Debug, Serialize)]
pub struct AdResponse {
    pub title: String,
    pub create_time: String,
}

impl From<Ad> for AdResponse {
    fn from(ad: Ad) -> Self {
        Self {
            title: ad.title,
            create_time: ad.create_time.to_rfc3339(),
        }
    }
}

/// Success envelope for mutations
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<AdId>,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok",
            id: None,
        }
    }

    fn created(id: AdId) -> Self {
        Self {
            status: "ok",
            id: Some(id),
        }
    }
}

/// GET /user/{id} - fetch a single ad
async fn get_ad(
    State(state): State<Arc<AppState>>,
    ValidAdId(id): ValidAdId,
) -> Result<Json<AdResponse>, ApiError> {
    let ad = state.store.get(id).await?;
    Ok(Json(AdResponse::from(ad)))
}

/// POST /user/ - create a new ad
async fn create_ad(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let new_ad = NewAd::from_json(&body)?;
    let ad = state.store.insert(new_ad).await?;

    tracing::debug!(id = ad.id, "created ad");
    Ok((StatusCode::CREATED, Json(StatusResponse::created(ad.id))))
}

/// PATCH /user/{id} - update the supplied fields of an ad
async fn update_ad(
    State(state): State<Arc<AppState>>,
    ValidAdId(id): ValidAdId,
    JsonBody(body): JsonBody,
) -> Result<Json<StatusResponse>, ApiError> {
    let patch = AdPatch::from_json(&body)?;
    state.store.update(id, patch).await?;
    Ok(Json(StatusResponse::ok()))
}

/// DELETE /user/{id} - remove an ad permanently
async fn delete_ad(
    State(state): State<Arc<AppState>>,
    ValidAdId(id): ValidAdId,
) -> Result<Json<StatusResponse>, ApiError> {
    state.store.delete(id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// Ad routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/", post(create_ad))
        .route("/user", post(create_ad))
        .route(
            "/user/{id}",
            get(get_ad).patch(update_ad).delete(delete_ad),
        )
}
