use crate::core::AvailabilityService;
use crate::domain::model::{AvailabilitySnapshot, AvailabilityStats, AvailabilityUpdate};
use crate::domain::ports::{CacheStore, PropertyStore};
use crate::utils::error::AvailabilityError;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub property_ids: Vec<String>,
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /api/availability/:id`
pub async fn get_availability<S, C>(
    State(service): State<Arc<AvailabilityService<S, C>>>,
    Path(property_id): Path<String>,
) -> Result<Json<AvailabilitySnapshot>, AvailabilityError>
where
    S: PropertyStore + 'static,
    C: CacheStore + 'static,
{
    let snapshot = service.get_availability(&property_id).await?;
    Ok(Json(snapshot))
}

/// `POST /api/availability/batch`
pub async fn get_multiple_availability<S, C>(
    State(service): State<Arc<AvailabilityService<S, C>>>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<Vec<AvailabilitySnapshot>>, AvailabilityError>
where
    S: PropertyStore + 'static,
    C: CacheStore + 'static,
{
    let snapshots = service
        .get_multiple_availability(&request.property_ids)
        .await?;
    Ok(Json(snapshots))
}

/// `PUT /api/availability/:id`
pub async fn update_availability<S, C>(
    State(service): State<Arc<AvailabilityService<S, C>>>,
    Path(property_id): Path<String>,
    Json(update): Json<AvailabilityUpdate>,
) -> Result<Json<AvailabilitySnapshot>, AvailabilityError>
where
    S: PropertyStore + 'static,
    C: CacheStore + 'static,
{
    let snapshot = service.update_availability(&property_id, update).await?;
    Ok(Json(snapshot))
}

/// `DELETE /api/availability/:id/cache`
pub async fn clear_cache<S, C>(
    State(service): State<Arc<AvailabilityService<S, C>>>,
    Path(property_id): Path<String>,
) -> Result<Json<serde_json::Value>, AvailabilityError>
where
    S: PropertyStore + 'static,
    C: CacheStore + 'static,
{
    service.clear_cache(&property_id).await?;
    Ok(Json(json!({ "ok": true })))
}

/// `GET /api/availability/stats`
pub async fn get_stats<S, C>(
    State(service): State<Arc<AvailabilityService<S, C>>>,
) -> Result<Json<AvailabilityStats>, AvailabilityError>
where
    S: PropertyStore + 'static,
    C: CacheStore + 'static,
{
    let stats = service.get_availability_stats().await?;
    Ok(Json(stats))
}
