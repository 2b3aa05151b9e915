use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Geocoding API error: {0}")]
    GeocodingApi(String),

    #[error("Places API error: {0}")]
    PlacesApi(String),

    #[error("Transit API error: {0}")]
    TransitApi(String),

    #[error("Favorite store error: {0}")]
    FavoriteStore(String),

    #[error("{0} has not been initialized")]
    Uninitialized(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::GeocodingApi(ref e) => {
                tracing::error!("Geocoding API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Geocoding service error")
            }
            AppError::PlacesApi(ref e) => {
                tracing::error!("Places API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Place lookup service error")
            }
            AppError::TransitApi(ref e) => {
                tracing::error!("Transit API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Transit service error")
            }
            AppError::FavoriteStore(ref e) => {
                tracing::warn!("Favorite store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Favorite store error")
            }
            AppError::Uninitialized(component) => {
                // Startup ordering bug, not a runtime condition
                tracing::error!("{} used before initialization", component);
                (StatusCode::INTERNAL_SERVER_ERROR, "Service not initialized")
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::NotFound(ref e) => (StatusCode::NOT_FOUND, e.as_str()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
