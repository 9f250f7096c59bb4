//! HTTP server module

mod api;
mod images;
mod static_files;
mod stats;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use api::HealthResponse;
pub use images::{ImageQuery, rejection_status};
pub use stats::{LimitQuery, RawLimitQuery};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/img/:width/:height", get(images::serve_image))
        .route("/stats", delete(stats::reset))
        .route("/stats/paths/recent", get(stats::recent_paths))
        .route("/stats/texts/recent", get(stats::recent_texts))
        .route("/stats/sizes/recent", get(stats::recent_sizes))
        .route("/stats/sizes/top", get(stats::top_sizes))
        .route("/stats/referrers/top", get(stats::top_referrers))
        .route("/stats/hits", get(stats::hits))
        .fallback(static_files::static_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn test_router_has_health_endpoint() {
        let state = Arc::new(AppState::new());
        let router = create_router(state);
        let server = TestServer::new(router).unwrap();

        let response = server.get("/api/health").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_image_requests_show_up_in_stats() {
        let server = TestServer::new(create_router(Arc::new(AppState::new()))).unwrap();

        server.get("/img/10/10").await.assert_status_ok();
        server.get("/img/10/10").await.assert_status_ok();
        server.get("/img/20/20").await.assert_status_ok();

        server.get("/stats/sizes/top").await.assert_json(&json!([
            {"w": 10, "h": 10, "n": 2},
            {"w": 20, "h": 20, "n": 1},
        ]));
        server
            .get("/stats/paths/recent")
            .await
            .assert_json(&json!(["/img/20/20", "/img/10/10"]));

        let hits: serde_json::Value = server.get("/stats/hits").await.json();
        assert_eq!(hits[0], json!({"title": "5s", "count": 3}));

        server.delete("/stats").await.assert_status_ok();
        server.get("/stats/sizes/top").await.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_unknown_routes_fall_through() {
        let server = TestServer::new(create_router(Arc::new(AppState::new()))).unwrap();

        server.get("/").await.assert_status_ok();
        server
            .get("/img/10")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .post("/stats")
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
