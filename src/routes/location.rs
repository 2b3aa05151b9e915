use crate::error::{AppError, Result};
use crate::models::UserLocation;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// POST /location/permission - Probe for geolocation permission
pub async fn request_permission(State(state): State<Arc<AppState>>) -> Json<Value> {
    let granted = state.resolver.resolve_permission().await;
    Json(json!({ "granted": granted }))
}

/// GET /location - Resolve a usable coordinate for the session
pub async fn resolve_location(State(state): State<Arc<AppState>>) -> Json<UserLocation> {
    Json(state.resolver.resolve_location().await)
}

#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub address: String,
}

/// GET /location/geocode?address= - Geocode a manually entered address
pub async fn geocode_address(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<UserLocation>> {
    if params.address.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "address must not be empty".to_string(),
        ));
    }

    tracing::info!("Geocode request for address: {}", params.address);

    match state.resolver.geocode_address(&params.address).await {
        Some(location) => Ok(Json(location)),
        None => Err(AppError::NotFound(
            "No results for that address".to_string(),
        )),
    }
}
