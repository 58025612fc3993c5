use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use market_core::{Category, FilterCriteria};
use screener::{apply_filter, summarize, DashboardAction, DashboardState, DashboardSummary, SortKey, SortSpec};
use serde::{Deserialize, Serialize};

use crate::{ApiResponse, AppState};

/// Criteria and sort as the filter panel sees them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaView {
    pub criteria: FilterCriteria,
    pub sort: SortSpec,
    pub query_error: Option<String>,
}

impl From<&DashboardState> for CriteriaView {
    fn from(dashboard: &DashboardState) -> Self {
        Self {
            criteria: dashboard.criteria().clone(),
            sort: dashboard.sort().clone(),
            query_error: dashboard.query_error().map(str::to_string),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleCategoryRequest {
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct ToggleSortRequest {
    pub key: SortKey,
}

pub fn screener_routes() -> Router<AppState> {
    Router::new()
        .route("/api/criteria", get(get_criteria).put(put_criteria))
        .route("/api/criteria/reset", post(reset_criteria))
        .route("/api/criteria/categories/toggle", post(toggle_category))
        .route("/api/sort/toggle", post(toggle_sort))
        .route("/api/summary", get(get_summary))
}

async fn apply(state: &AppState, action: DashboardAction) -> CriteriaView {
    let mut dashboard = state.dashboard.write().await;
    tracing::debug!(?action, "Dashboard update");
    dashboard.update(action);
    CriteriaView::from(&*dashboard)
}

async fn get_criteria(State(state): State<AppState>) -> Json<ApiResponse<CriteriaView>> {
    let dashboard = state.dashboard.read().await;
    Json(ApiResponse::success(CriteriaView::from(&*dashboard)))
}

/// Replace the criteria wholesale; missing fields take their defaults.
async fn put_criteria(
    State(state): State<AppState>,
    Json(criteria): Json<FilterCriteria>,
) -> Json<ApiResponse<CriteriaView>> {
    Json(ApiResponse::success(apply(&state, DashboardAction::SetCriteria(criteria)).await))
}

async fn reset_criteria(State(state): State<AppState>) -> Json<ApiResponse<CriteriaView>> {
    Json(ApiResponse::success(apply(&state, DashboardAction::ResetFilters).await))
}

async fn toggle_category(
    State(state): State<AppState>,
    Json(req): Json<ToggleCategoryRequest>,
) -> Json<ApiResponse<CriteriaView>> {
    Json(ApiResponse::success(
        apply(&state, DashboardAction::ToggleCategory(req.category)).await,
    ))
}

async fn toggle_sort(
    State(state): State<AppState>,
    Json(req): Json<ToggleSortRequest>,
) -> Json<ApiResponse<CriteriaView>> {
    Json(ApiResponse::success(apply(&state, DashboardAction::ToggleSort(req.key)).await))
}

async fn get_summary(State(state): State<AppState>) -> Json<ApiResponse<DashboardSummary>> {
    let criteria = state.dashboard.read().await.criteria().clone();
    let view = apply_filter(&state.securities, &criteria);
    Json(ApiResponse::success(summarize(state.securities.len(), &view, criteria.market)))
}
