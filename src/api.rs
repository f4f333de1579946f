//! HTTP Control Surface
//!
//! Small REST surface over the rate store:
//! - `GET /` serves the slider page
//! - `GET /get_rates` returns the current table
//! - `POST /update_rates` applies a partial or full update
//! - `GET /health` and `GET /stats` for operators

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::SimConfig;
use crate::core::RateTable;
use crate::engine::{EngineStats, StatsSnapshot};
use crate::rates::RateStore;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Handles shared by every request
#[derive(Clone)]
pub struct AppState {
    pub rates: RateStore,
    pub stats: Arc<EngineStats>,
}

impl AppState {
    pub fn new(rates: RateStore, stats: Arc<EngineStats>) -> Self {
        Self { rates, stats }
    }
}

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Body of `/update_rates` responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatesResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<RateTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RatesResponse {
    pub fn success(rates: RateTable) -> Self {
        Self {
            status: "success".to_string(),
            rates: Some(rates),
            message: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            status: "error".to_string(),
            rates: None,
            message: Some(msg.to_string()),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get_rates", get(get_rates))
        .route("/update_rates", post(update_rates))
        .route("/health", get(|| async { "OK" }))
        .route("/stats", get(stats))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn get_rates(State(state): State<AppState>) -> Json<RateTable> {
    Json(state.rates.get_rates())
}

async fn update_rates(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "malformed rate update");
            return (
                StatusCode::BAD_REQUEST,
                Json(RatesResponse::error(&rejection.body_text())),
            )
                .into_response();
        }
    };

    match state.rates.set_rates(body.iter().map(|(k, v)| (k.as_str(), v))) {
        Ok(table) => {
            info!(?table, "rates updated");
            Json(RatesResponse::success(table)).into_response()
        }
        Err(error) => {
            warn!(%error, "rejected rate update");
            error.into_response()
        }
    }
}

async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}

// ============================================================================
// API Documentation
// ============================================================================

pub fn get_api_routes() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("GET", "/", "Rate control page"),
        ("GET", "/get_rates", "Current rate per category"),
        ("POST", "/update_rates", "Set one or more category rates"),
        ("GET", "/health", "Liveness probe"),
        ("GET", "/stats", "Lines emitted and failed per category"),
    ]
}

/// Print API documentation to stdout
pub fn print_api_docs(config: &SimConfig) {
    let base = format!("http://{}:{}", config.host, config.port);
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║           logsim HTTP Control API                            ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║ Base URL: {:50} ║", base);
    println!("║ Log dir:  {:50} ║", config.log_dir.display());
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║ ENDPOINTS                                                    ║");
    println!("╠──────────────────────────────────────────────────────────────╣");

    for (method, path, desc) in get_api_routes() {
        println!("║ {:6} {:13} - {:39} ║", method, path, desc);
    }

    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║ EXAMPLE USAGE                                                ║");
    println!("╠──────────────────────────────────────────────────────────────╣");
    println!("║ curl -X POST {:47} ║", format!("{base}/update_rates \\"));
    println!("║   -H 'Content-Type: application/json' \\                      ║");
    println!("║   -d '{{\"access\": 80, \"error\": 5}}'                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}
