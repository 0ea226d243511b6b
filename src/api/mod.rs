//! Snow Atlas REST API
//!
//! HTTP API layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Views
//! - `GET /api/v1/map` - Density map (`price`, `night_ski`, `summer_ski`, `snowpark`)
//! - `GET /api/v1/report` - Country report (`country`, `metric`); 204 with no country
//! - `GET /api/v1/report-card` - Report card of a resort (`resort`)
//! - `POST /api/v1/report-card` - Report card from a chart hover payload
//!
//! ## Options
//! - `GET /api/v1/continents` - Continents
//! - `GET /api/v1/countries` - Countries of a continent (`continent`)
//! - `GET /api/v1/metrics` - Report metrics
//! - `GET /api/v1/controls` - Control descriptors and defaults
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Per-session dashboard dispatcher
//!
//! # Example
//!
//! ```rust,ignore
//! use snowatlas::api::{serve, AppState};
//! use snowatlas::config::Config;
//! use snowatlas::dataset::DatasetLoader;
//! use snowatlas::views::Dashboard;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default().config;
//!     let dataset = DatasetLoader::new().load_path(&config.dataset.path)?;
//!     let dashboard = Dashboard::new(Arc::new(dataset), config.dashboard.clone())?;
//!
//!     serve(AppState::new(dashboard, config.api.clone())).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // View routes
        .route("/map", get(routes::map::get_map))
        .route("/report", get(routes::report::get_report))
        .route(
            "/report-card",
            get(routes::card::get_card).post(routes::card::hover_card),
        )
        // Option routes
        .route("/continents", get(routes::options::list_continents))
        .route("/countries", get(routes::options::get_countries))
        .route("/metrics", get(routes::options::list_metrics))
        .route("/controls", get(routes::options::get_controls));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS policy: permissive unless origins are configured
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Snow Atlas API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Snow Atlas API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::dataset::sample_dataset;
    use crate::views::Dashboard;
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let dashboard =
            Dashboard::new(Arc::new(sample_dataset()), DashboardConfig::default()).unwrap();
        build_router(AppState::new(dashboard, ApiConfig::default()))
    }

    async fn get(app: Router, uri: &str) -> Response<Body> {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["resorts"], 18);
        assert_eq!(body["countries"], 8);
        assert_eq!(body["active_sessions"], 0);
    }

    #[tokio::test]
    async fn test_map_with_params() {
        let response = get(
            create_test_app(),
            "/api/v1/map?price=50&night_ski=No&summer_ski=No&snowpark=No",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["title"], "Resorts with a ticket price less than $50.");
        let labels: Vec<&str> = body["figure"]["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["Hemsedal", "Geilo", "Hakuba Happo-One"]);
    }

    #[tokio::test]
    async fn test_map_defaults() {
        let response = get(create_test_app(), "/api/v1/map").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["title"], "Resorts with a ticket price less than $150.");
    }

    #[tokio::test]
    async fn test_map_invalid_flag() {
        let response = get(create_test_app(), "/api/v1/map?snowpark=maybe").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_continents_and_countries() {
        let body = json_body(get(create_test_app(), "/api/v1/continents").await).await;
        assert_eq!(
            body["continents"],
            serde_json::json!(["Europe", "North America", "Southern Hemisphere", "Asia"])
        );

        let uri = "/api/v1/countries?continent=Southern%20Hemisphere";
        let body = json_body(get(create_test_app(), uri).await).await;
        assert_eq!(body["countries"], serde_json::json!(["Chile", "New Zealand"]));
    }

    #[tokio::test]
    async fn test_metrics_and_controls() {
        let body = json_body(get(create_test_app(), "/api/v1/metrics").await).await;
        assert_eq!(body["metrics"][0]["column"], "Price");
        assert_eq!(body["metrics"][0]["required"], true);

        let body = json_body(get(create_test_app(), "/api/v1/controls").await).await;
        assert_eq!(body["price"]["step"], 25.0);
        assert_eq!(body["flags"][0]["options"][0]["label"], "Has Night Skiing");
    }

    #[tokio::test]
    async fn test_report() {
        let response = get(create_test_app(), "/api/v1/report?country=Norway&metric=Price").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["title"], "Top Resorts in Norway by Price");
        assert_eq!(body["chart"]["bars"][0]["customdata"], serde_json::json!(["Trysil"]));
    }

    #[tokio::test]
    async fn test_report_without_country_is_no_content() {
        let response = get(create_test_app(), "/api/v1/report?metric=Price").await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = get(create_test_app(), "/api/v1/report?country=&metric=Latitude").await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_report_invalid_metric() {
        let response =
            get(create_test_app(), "/api/v1/report?country=Norway&metric=Latitude").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "INVALID_METRIC");
    }

    #[tokio::test]
    async fn test_report_card() {
        let body = json_body(get(create_test_app(), "/api/v1/report-card").await).await;
        assert_eq!(body["resort"], "Hemsedal");
        assert_eq!(body["price"], "Price Rank: 2");

        let response = get(create_test_app(), "/api/v1/report-card?resort=Narnia").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "RESORT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_report_card_from_hover() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/report-card")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"points":[{"customdata":["Zermatt"]}]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["resort"], "Zermatt");
        assert_eq!(body["elevation"], "Elevation Rank: 1");
    }

    #[tokio::test]
    async fn test_report_card_invalid_json() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/report-card")
                    .header("Content-Type", "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
