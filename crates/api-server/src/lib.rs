//! HTTP service for the market dashboard.
//!
//! Holds one generated universe and one dashboard session in memory. All
//! table views are recomputed from the immutable universe on every request.

mod ai_routes;
pub mod config;
mod export_routes;
mod screener_routes;
mod security_routes;

#[cfg(test)]
mod router_tests;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use llm_client::{LlmConfig, OpenAiAnalyst};
use market_core::{AiAnalyst, Security};
use screener::{DashboardState, StateError};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use universe_generator::{GeneratorConfig, UniverseGenerator};

pub use config::ServerConfig;

const DEFAULT_LOG_FILTER: &str = "api_server=info,universe_generator=info,llm_client=info,tower_http=info";

#[derive(Clone)]
pub struct AppState {
    pub securities: Arc<Vec<Security>>,
    pub dashboard: Arc<RwLock<DashboardState>>,
    pub analyst: Arc<dyn AiAnalyst>,
    pub seed: u64,
}

impl AppState {
    pub fn new(securities: Vec<Security>, seed: u64, analyst: Arc<dyn AiAnalyst>) -> Self {
        Self {
            securities: Arc::new(securities),
            dashboard: Arc::new(RwLock::new(DashboardState::new())),
            analyst,
            seed,
        }
    }
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A non-fatal failure that still carries the (unchanged) current state.
    pub fn degraded(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler error: an `anyhow::Error` plus the status to answer with.
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn with_status(status: StatusCode, error: anyhow::Error) -> Self {
        Self { status, error }
    }

    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, anyhow::anyhow!("{} not found", what))
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.error, "Request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.error, "Request rejected");
        }
        (self.status, Json(ApiResponse::error(self.error.to_string()))).into_response()
    }
}

/// Busy affordances answer 409 so the caller can retry after the current call lands.
pub(crate) fn state_err(err: StateError) -> AppError {
    let status = match err {
        StateError::Busy(_) => StatusCode::CONFLICT,
        StateError::NoSelection => StatusCode::BAD_REQUEST,
    };
    AppError::with_status(status, err.into())
}

pub fn build_router(state: AppState, cors_allow_origin: Option<&str>) -> anyhow::Result<Router> {
    let cors = match cors_allow_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    Ok(Router::new()
        .merge(security_routes::security_routes())
        .merge(screener_routes::screener_routes())
        .merge(ai_routes::ai_routes())
        .merge(export_routes::export_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env()?;
    init_tracing(config.json_logs);

    tracing::info!(size = config.universe_size, seed = ?config.universe_seed, "Generating security universe");
    let generator = UniverseGenerator::new(GeneratorConfig {
        count: config.universe_size,
        seed: config.universe_seed,
        ..GeneratorConfig::default()
    });
    let (securities, seed) = tokio::task::spawn_blocking(move || generator.generate()).await?;

    let analyst = OpenAiAnalyst::new(LlmConfig::from_env())?;
    if analyst.is_configured() {
        tracing::info!(model = %analyst.config().model, "AI features enabled");
    } else {
        tracing::warn!("OPENAI_API_KEY not set; AI features disabled");
    }

    let state = AppState::new(securities, seed, Arc::new(analyst));
    let app = build_router(state, config.cors_allow_origin.as_deref())?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Dashboard API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
