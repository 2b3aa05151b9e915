use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

/// Routes reachable without a session. Entries match exactly or as a path
/// prefix (one level of nesting, e.g. `/api/v1/location/geocode`).
const PUBLIC_ROUTES: &[&str] = &["/", "/api/v1/debug/health", "/api/v1/location"];

pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES
        .iter()
        .any(|route| path == *route || (*route != "/" && path.starts_with(&format!("{}/", route))))
}

/// Client for the external identity provider's session-verification
/// endpoint. Session management itself is entirely the provider's concern;
/// this only asks "is this token a live session".
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: String) -> Self {
        AuthClient {
            client: Client::new(),
            base_url,
        }
    }

    /// Verify a bearer token. Any transport error or non-2xx answer counts
    /// as unverified.
    pub async fn verify_session(&self, token: &str) -> bool {
        let url = format!("{}/sessions/verify", self.base_url);

        match self.client.get(&url).bearer_auth(token).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Session verification failed: {}", e);
                false
            }
        }
    }
}

/// Middleware-level route protection: public routes pass through, all
/// others need a verified bearer session. Disabled entirely when no
/// identity provider is configured.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(auth) = &state.auth else {
        return next.run(request).await;
    };

    if is_public_route(request.uri().path()) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if auth.verify_session(token).await => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized",
                "message": "A valid session is required",
            })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_health_are_public() {
        assert!(is_public_route("/"));
        assert!(is_public_route("/api/v1/debug/health"));
    }

    #[test]
    fn location_routes_are_public_by_prefix() {
        assert!(is_public_route("/api/v1/location"));
        assert!(is_public_route("/api/v1/location/geocode"));
        assert!(is_public_route("/api/v1/location/permission"));
    }

    #[test]
    fn boards_and_favorites_are_protected() {
        assert!(!is_public_route("/api/v1/boards"));
        assert!(!is_public_route("/api/v1/favorites/d1"));
        assert!(!is_public_route("/other"));
    }

    #[test]
    fn prefix_matching_requires_a_segment_boundary() {
        assert!(!is_public_route("/api/v1/locationx"));
    }
}
