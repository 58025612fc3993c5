use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use market_core::Security;
use screener::{screen, DashboardAction, DetailSnapshot};
use serde::{Deserialize, Serialize};
use universe_generator::find_by_id;
use uuid::Uuid;

use crate::{ApiResponse, AppError, AppState};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 500;

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub universe_size: usize,
    pub seed: u64,
    pub ai_enabled: bool,
    pub ai_backend: &'static str,
}

/// One window of the filtered, sorted table.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityWindow {
    pub total: usize,
    pub matching: usize,
    pub offset: usize,
    pub limit: usize,
    pub rows: Vec<Security>,
}

pub fn security_routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/securities", get(list_securities))
        .route("/api/securities/:id", get(get_security).delete(close_security))
}

async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus {
        status: "ok",
        universe_size: state.securities.len(),
        seed: state.seed,
        ai_enabled: state.analyst.is_configured(),
        ai_backend: state.analyst.backend_name(),
    }))
}

async fn list_securities(
    State(state): State<AppState>,
    Query(window): Query<WindowQuery>,
) -> Json<ApiResponse<SecurityWindow>> {
    let (criteria, sort) = {
        let dashboard = state.dashboard.read().await;
        (dashboard.criteria().clone(), dashboard.sort().clone())
    };

    let limit = window.limit.min(MAX_PAGE_SIZE);
    let view = screen(&state.securities, &criteria, &sort);
    let rows = view
        .iter()
        .skip(window.offset)
        .take(limit)
        .map(|s| (*s).clone())
        .collect();

    Json(ApiResponse::success(SecurityWindow {
        total: state.securities.len(),
        matching: view.len(),
        offset: window.offset,
        limit,
        rows,
    }))
}

/// Open the detail view. Re-opening the selected security keeps any AI override.
async fn get_security(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DetailSnapshot>>, AppError> {
    let security = find_by_id(&state.securities, id).ok_or_else(|| AppError::not_found(id))?;

    let mut dashboard = state.dashboard.write().await;
    if dashboard.selected() != Some(id) {
        dashboard.update(DashboardAction::Select(Box::new(security.clone())));
    }
    let snapshot = dashboard
        .detail()
        .map(|d| d.snapshot())
        .ok_or_else(|| AppError::not_found(id))?;

    Ok(Json(ApiResponse::success(snapshot)))
}

async fn close_security(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<ApiResponse<bool>> {
    let mut dashboard = state.dashboard.write().await;
    let was_open = dashboard.selected() == Some(id);
    if was_open {
        dashboard.update(DashboardAction::CloseDetail);
    }
    Json(ApiResponse::success(was_open))
}
