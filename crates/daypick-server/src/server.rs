//! Axum HTTP server.
//!
//! Exposes the pipeline through one request/response contract:
//! - `POST /api/generate` with `{"module": <key>}`
//! - `GET /api/generate?module=<key>` (equivalent form for manual testing)
//! - `GET /api/health`

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use daypick_core::{generic_fallback, pick_fallback_with, GenerationResponse, ModuleKind, Source};
use daypick_provider::{GeminiClient, GenerateClient, ProviderConfig};

use crate::config::ServerConfig;
use crate::orchestrator::{Orchestrator, PipelineError, PipelineReply};

/// Module used for the best-effort server-error payload when the requested
/// one is unknown.
const DEFAULT_MODULE: ModuleKind = ModuleKind::Comfort;

struct AppState {
    orchestrator: Arc<Orchestrator>,
    has_api_key: bool,
    start_time: Instant,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    module: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    module: Option<String>,
    error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    has_api_key: bool,
    version: &'static str,
    uptime_secs: u64,
    now: String,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", config.port);
    let app = router(&config)?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, has_api_key = config.has_api_key(), "daypick-server listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn router(config: &ServerConfig) -> anyhow::Result<Router> {
    let client: Option<Arc<dyn GenerateClient>> = match &config.api_key {
        Some(key) => {
            let provider_config = ProviderConfig::new(key.expose_secret())
                .with_base_url(config.base_url.clone())
                .with_timeout_seconds(config.request_timeout_secs);
            Some(Arc::new(
                GeminiClient::new(provider_config).context("failed to build Gemini client")?,
            ))
        }
        None => None,
    };

    let orchestrator = Arc::new(Orchestrator::new(
        client,
        config.primary_model.clone(),
        config.secondary_model.clone(),
    ));

    Ok(app(Arc::new(AppState {
        orchestrator,
        has_api_key: config.has_api_key(),
        start_time: Instant::now(),
    })))
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/generate",
            get(generate_get).post(generate_post),
        )
        .route("/api/health", get(health_handler))
        .with_state(state)
}

async fn generate_post(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    run_pipeline(state, request.module).await
}

async fn generate_get(
    State(state): State<Arc<AppState>>,
    Query(request): Query<GenerateRequest>,
) -> Response {
    run_pipeline(state, request.module).await
}

async fn run_pipeline(state: Arc<AppState>, module: Option<String>) -> Response {
    let module_key = module.unwrap_or_default();
    let orchestrator = state.orchestrator.clone();

    // Outermost boundary: a fault anywhere inside the pipeline must still
    // produce a usable payload, so the run is joined rather than awaited
    // inline and a panic becomes a tagged fallback.
    let requested = module_key.clone();
    let joined =
        tokio::spawn(async move { orchestrator.handle(&requested).await }).await;

    match joined {
        Ok(Ok(PipelineReply::Success(response))) => {
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(Ok(PipelineReply::StrictUnavailable { module, detail })) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                module: Some(module.as_str().to_string()),
                error: detail,
            }),
        )
            .into_response(),
        Ok(Err(PipelineError::UnknownModule(key))) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                module: None,
                error: format!("unknown or missing module: {key:?}"),
            }),
        )
            .into_response(),
        Err(join_error) => {
            tracing::error!(module = %module_key, %join_error, "pipeline fault");
            let (module, data) = match ModuleKind::parse(&module_key) {
                Some(module) => (
                    module,
                    pick_fallback_with(module, &mut rand::thread_rng()),
                ),
                None => (DEFAULT_MODULE, generic_fallback()),
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerationResponse::fallback(
                    module,
                    data,
                    Source::FallbackServerError,
                )),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        has_api_key: state.has_api_key,
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
        now: chrono::Utc::now().to_rfc3339(),
    })
}
