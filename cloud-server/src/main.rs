//! Outage Impact Simulator - HTTP API Server
//!
//! Serves the impact model to browser UIs and scripts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              OUTAGE-SIM SERVER               │
//! ├──────────────────────────────────────────────┤
//! │  ┌───────────┐        ┌───────────────────┐  │
//! │  │  API      │ ─────► │  Session          │  │
//! │  │  (Axum)   │        │  (RwLock, latest  │  │
//! │  └───────────┘        │   run + CSV)      │  │
//! │                       └───────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod extract;
mod handlers;

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outage_sim_core::{ModelConstants, Session, SharedSession};

pub use error::{AppError, AppResult};

const DEFAULT_LOG_FILTER: &str = "outage_sim_server=debug,outage_sim_core=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment (RUST_LOG included)
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(&config);

    tracing::info!("Outage Impact Simulator server starting ({})", config.environment);

    let constants = ModelConstants::from_env();
    tracing::info!(
        primary_region = %constants.primary_region,
        arrival_rate_per_min = constants.arrival_rate_per_min,
        "Model constants loaded"
    );

    let state = AppState {
        session: Session::new(constants).shared(),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors = if state.config.cors_allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/factors", get(handlers::factors::table))
        .route("/api/v1/scenario/defaults", get(handlers::simulate::defaults))
        .route("/api/v1/simulate", post(handlers::simulate::simulate))
        .route("/api/v1/compute", post(handlers::simulate::compute))
        .route("/api/v1/runs/latest", get(handlers::runs::latest))
        .route("/api/v1/runs/latest/report.csv", get(handlers::runs::latest_csv))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        extract::State,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use outage_sim_core::logic::run::FixedClock;
    use outage_sim_core::ScenarioParams;

    const REFERENCE_CSV_ROW: &str = "2025-01-01T00:00:00.000Z,us-east-1,major,2,warm,99.9,45,0.281,0.368,5,17,11,33,0,97.999,32,74.42,true,10098,0,0,0,0,0";

    fn test_state() -> AppState {
        let clock = FixedClock::from_millis(1_735_689_600_000).unwrap();
        AppState {
            session: Session::with_clock(ModelConstants::default(), Arc::new(clock)).shared(),
            config: config::Config::default(),
        }
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    fn default_params() -> Value {
        serde_json::to_value(ScenarioParams::default()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(test_state());
        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["has_latest_run"], false);
    }

    #[tokio::test]
    async fn test_latest_without_run_is_404() {
        let app = create_router(test_state());

        let response = app.clone().oneshot(get_request("/api/v1/runs/latest")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["status"], 404);

        let response = app
            .oneshot(get_request("/api/v1/runs/latest/report.csv"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_simulate_then_export() {
        let app = create_router(test_state());

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/simulate", &default_params()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let metrics = &json["record"]["metrics"];
        assert_eq!(metrics["rtoMin"], 33);
        assert_eq!(metrics["allowedDowntimeMin"], 43);
        assert_eq!(metrics["backlogRequests"], 10098);
        assert_eq!(metrics["sloBreached"], true);
        assert_eq!(json["record"]["input"]["azCount"], 2);
        assert_eq!(json["narration"].as_array().map(Vec::len), Some(6));
        assert_eq!(json["indicators"]["breach"]["level"], "bad");
        let run_id = json["record"]["runId"].clone();

        let response = app
            .clone()
            .oneshot(get_request("/api/v1/runs/latest"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["runId"], run_id);

        let response = app
            .oneshot(get_request("/api/v1/runs/latest/report.csv"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"outage_report.csv\""
        );

        let csv = body_string(response).await;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("timestamp,region,severity,"));
        assert_eq!(lines[1], REFERENCE_CSV_ROW);
    }

    #[tokio::test]
    async fn test_simulate_rejects_invalid_input() {
        let app = create_router(test_state());
        let mut params = default_params();
        params["durationMin"] = Value::from(0);

        let response = app
            .clone()
            .oneshot(post_json("/api/v1/simulate", &params))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], 400);
        assert!(json["error"].as_str().unwrap().contains("durationMin"));

        // Nothing was recorded
        let response = app.oneshot(get_request("/api/v1/runs/latest")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_severity_is_json_400() {
        let app = create_router(test_state());
        let mut params = default_params();
        params["severity"] = Value::from("extreme");

        for uri in ["/api/v1/simulate", "/api/v1/compute"] {
            let response = app.clone().oneshot(post_json(uri, &params)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

            let json = body_json(response).await;
            assert_eq!(json["status"], 400);
            assert!(json["error"].as_str().unwrap().contains("extreme"));
        }
    }

    #[tokio::test]
    async fn test_compute_does_not_record() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = app
            .oneshot(post_json("/api/v1/compute", &default_params()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["burnMin"], 32);

        assert!(state.session.read().latest().is_none());
    }

    #[tokio::test]
    async fn test_factors_and_defaults() {
        let app = create_router(test_state());

        let response = app.clone().oneshot(get_request("/api/v1/factors")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["severity"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["primaryRegion"], "us-east-1");

        let response = app
            .oneshot(get_request("/api/v1/scenario/defaults"))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["presetId"], "s3-regional");
        assert_eq!(json["dependencies"], serde_json::json!(["s3"]));
    }

    #[test]
    fn test_health_handler_reports_latest_run() {
        let state = test_state();
        state
            .session
            .write()
            .run_params(ScenarioParams::default())
            .unwrap();

        let axum::Json(health) = tokio_test::block_on(handlers::health::check(State(state)));
        let json = serde_json::to_value(health).unwrap();
        assert_eq!(json["has_latest_run"], true);
    }
}
