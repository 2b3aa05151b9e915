pub mod boards;
pub mod debug;
pub mod favorites;
pub mod location;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/debug/health", get(debug::health_check))
        .route("/location", get(location::resolve_location))
        .route("/location/permission", post(location::request_permission))
        .route("/location/geocode", get(location::geocode_address))
        .route("/boards", post(boards::create_board))
        .route(
            "/boards/{id}",
            get(boards::get_board).delete(boards::delete_board),
        )
        .route("/boards/{id}/refresh", post(boards::refresh_board))
        .route("/boards/{id}/routes/{route_id}", get(boards::route_detail))
        .route(
            "/boards/{id}/routes/{route_id}/destinations",
            get(boards::route_destinations),
        )
        .route(
            "/boards/{id}/destinations/{destination_id}",
            get(boards::destination_detail),
        )
        .route(
            "/favorites/{id}",
            put(favorites::set_favorite)
                .delete(favorites::unset_favorite)
                .get(favorites::get_favorite),
        )
        .route("/favorites/{id}/toggle", post(favorites::toggle_favorite))
        .with_state(state)
}
