// HTTP relay server - the single configurable generate endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ProxyConfig;
use crate::error::RelayError;
use crate::providers::{get_adapter, ProviderAdapter};
use crate::types::{validate_generate_body, GenerateResponse};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub adapter: Arc<dyn ProviderAdapter>,
}

impl AppState {
    pub fn from_config(config: ProxyConfig) -> Self {
        let adapter = get_adapter(config.provider);
        AppState {
            config: Arc::new(config),
            adapter,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // The client is served from another origin, so cross-origin headers stay
    // permissive and pre-flight OPTIONS answers 200 with an empty body.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/generate", post(generate).options(preflight))
        .layer(cors)
        .with_state(state)
}

pub async fn run_http_server(state: AppState, port: u16) {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind HTTP server to port {}: {}", port, e);
            eprintln!("Try setting RELAY_HTTP_PORT to a different port, e.g.:");
            eprintln!("  RELAY_HTTP_PORT=3002 cargo run --bin relay-server");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("HTTP server error: {}", e);
    }
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "prompt-relay",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "GET /api/health",
            "generate": "POST /api/generate"
        }
    }))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

async fn generate(State(state): State<AppState>, Json(body): Json<Value>) -> impl IntoResponse {
    let (status, payload) = generate_impl(&state, &body).await;
    (status, Json(payload))
}

/// The whole request/response contract, separated from axum so tests can
/// drive it with an injected adapter.
///
/// Status policy: request-shape violations are 400 and a missing credential
/// is 500, but every upstream-facing failure is 200 with an `error` body so
/// browser clients branch on payload shape, not on fetch failure.
pub async fn generate_impl(state: &AppState, body: &Value) -> (StatusCode, Value) {
    let prompt = match validate_generate_body(body, state.config.max_prompt_chars) {
        Ok(p) => p,
        Err(e) => return reply(e),
    };

    if !state.config.has_api_key() {
        log::error!(
            "generate: no API key configured ({})",
            state.config.provider.key_env_var()
        );
        return reply(RelayError::ServerMisconfigured);
    }

    log::info!(
        "generate: {} chars via {} ({})",
        prompt.chars().count(),
        state.adapter.name(),
        state.config.model
    );

    match state.adapter.complete(&prompt, &state.config).await {
        Ok(normalized) => (
            StatusCode::OK,
            GenerateResponse::result(normalized.text).to_json(),
        ),
        Err(e) => reply(e),
    }
}

fn reply(err: RelayError) -> (StatusCode, Value) {
    // The detail stays server-side; clients get the generic message.
    if let RelayError::Internal(detail) = &err {
        log::error!("generate: internal error: {}", detail);
    }
    (err.status(), GenerateResponse::error(err.to_string()).to_json())
}
