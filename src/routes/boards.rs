use crate::error::{AppError, Result};
use crate::models::{
    Coordinates, DestinationDetail, DestinationSummary, DiscoveryFilters, RouteDetail,
};
use crate::scheduler::RouteBoard;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub filters: DiscoveryFilters,
}

/// POST /boards - Mount a route board and start its refresh task
pub async fn create_board(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateBoardRequest>,
) -> Result<Json<Value>> {
    let location = Coordinates::new(request.latitude, request.longitude)
        .map_err(AppError::InvalidRequest)?;

    tracing::info!(
        "Mounting board at {:?} with filters {:?}",
        location,
        request.filters
    );

    let board_id = state.scheduler.mount(location, request.filters).await;
    Ok(Json(json!({ "board_id": board_id })))
}

/// GET /boards/{id} - Current board state
pub async fn get_board(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteBoard>> {
    state
        .scheduler
        .board(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Board not found".to_string()))
}

/// POST /boards/{id}/refresh - Manual refresh through the timer's fetch path
pub async fn refresh_board(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteBoard>> {
    state
        .scheduler
        .refresh_now(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Board not found".to_string()))
}

/// DELETE /boards/{id} - Unmount the board and cancel its refresh task
pub async fn delete_board(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.scheduler.unmount(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Board not found".to_string()))
    }
}

/// GET /boards/{id}/routes/{route_id} - Route detail with upcoming arrivals
pub async fn route_detail(
    State(state): State<Arc<AppState>>,
    Path((id, route_id)): Path<(Uuid, String)>,
) -> Result<Json<RouteDetail>> {
    let (location, _) = board_params(&state, &id).await?;

    state
        .source
        .fetch_route_detail(&route_id, &location)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))
}

/// GET /boards/{id}/routes/{route_id}/destinations - Destinations reachable
/// via a route, under the board's filters
pub async fn route_destinations(
    State(state): State<Arc<AppState>>,
    Path((id, route_id)): Path<(Uuid, String)>,
) -> Result<Json<Vec<DestinationSummary>>> {
    let (location, filters) = board_params(&state, &id).await?;

    let destinations = state
        .source
        .fetch_destinations(&route_id, &location, &filters)
        .await?;
    Ok(Json(destinations))
}

/// GET /boards/{id}/destinations/{destination_id} - Full destination detail
pub async fn destination_detail(
    State(state): State<Arc<AppState>>,
    Path((id, destination_id)): Path<(Uuid, String)>,
) -> Result<Json<DestinationDetail>> {
    let (location, _) = board_params(&state, &id).await?;

    state
        .source
        .fetch_destination_detail(&destination_id, &location)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Destination not found".to_string()))
}

async fn board_params(
    state: &AppState,
    id: &Uuid,
) -> Result<(Coordinates, DiscoveryFilters)> {
    state
        .scheduler
        .board_params(id)
        .await
        .ok_or_else(|| AppError::NotFound("Board not found".to_string()))
}
