use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    // Check the favorite store
    match state.favorites.get() {
        Ok(store) => {
            if store.health_check().await {
                status["checks"]["favorite_store"] = json!(store.backend_name());
            } else {
                status["checks"]["favorite_store"] =
                    json!({"error": format!("{} backend unhealthy", store.backend_name())});
                status["status"] = json!("error");
            }
        }
        Err(e) => {
            status["checks"]["favorite_store"] = json!({"error": e.to_string()});
            status["status"] = json!("error");
        }
    }

    status["checks"]["data_source"] = json!(state.source.name());
    status["checks"]["active_boards"] = json!(state.scheduler.active_boards().await);
    status["checks"]["auth"] = json!(if state.auth.is_some() {
        "enabled"
    } else {
        "disabled"
    });

    Json(status)
}
