use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// PUT /favorites/{id} - Mark a destination as a favorite
pub async fn set_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.favorites.get()?.set_favorite(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /favorites/{id} - Remove the favorite marker
pub async fn unset_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.favorites.get()?.unset_favorite(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /favorites/{id} - Whether a destination is marked
pub async fn get_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let favorite = state.favorites.get()?.is_favorite(&id).await?;
    Ok(Json(json!({ "favorite": favorite })))
}

/// POST /favorites/{id}/toggle - Flip the marker, returning the new state
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let favorite = state.favorites.get()?.toggle_favorite(&id).await?;
    Ok(Json(json!({ "favorite": favorite })))
}
