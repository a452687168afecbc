// ABOUTME: Route definitions for the guestd HTTP API.
// ABOUTME: Assembles the guest CRUD routes, CORS, and request tracing into one Router.

use axum::Router;
use axum::routing::get;
use http::Method;
use http::header::CONTENT_TYPE;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/guests",
            get(api::guests::list_guests).post(api::guests::create_guest),
        )
        .route(
            "/guests/{id}",
            get(api::guests::get_guest)
                .put(api::guests::update_guest)
                .delete(api::guests::delete_guest),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Permissive browser access: any origin, the four CRUD methods, JSON bodies.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppState;
    use axum::body::Body;
    use guestd_store::GuestStore;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> SharedState {
        let dir = tempfile::TempDir::new().unwrap();
        let store = GuestStore::open(&dir.keep().join("guests.db")).unwrap();
        Arc::new(AppState::new(store))
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = create_router(test_state());
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn cors_preflight_allows_any_origin() {
        let app = create_router(test_state());
        let resp = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/guests")
                    .header("origin", "https://front.example")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
