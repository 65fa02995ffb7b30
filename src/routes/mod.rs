//! HTTP route handlers

pub mod extract;
pub mod health;
pub mod quiz;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .nest("/health", health::router())
        .merge(extract::router(state.config().server.upload_max_bytes))
        .merge(quiz::router());

    Router::new()
        .nest("/health", health::router())
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::ocr::MockEngine;

    fn test_app() -> Router {
        let state = AppState::with_engine(
            Config::default(),
            Arc::new(MockEngine::new(vec![], vec![])),
        );
        app(state)
    }

    #[tokio::test]
    async fn test_health() {
        for uri in ["/health", "/api/health"] {
            let response = test_app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["ok"], true);
            assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
