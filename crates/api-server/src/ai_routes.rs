//! The two AI affordances. Each claims its in-flight slot under the write
//! lock, releases the lock for the remote call, and records the outcome
//! under a fresh lock. The remote call runs on its own task so the slot is
//! released even if the client disconnects.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use screener::{Affordance, DashboardAction, DetailSnapshot};
use serde::Deserialize;
use universe_generator::find_by_id;
use uuid::Uuid;

use crate::screener_routes::CriteriaView;
use crate::{state_err, ApiResponse, AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct FilterQueryRequest {
    pub query: String,
}

pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ai/filters", post(suggest_filters))
        .route("/api/securities/:id/analyze", post(analyze_security))
}

async fn suggest_filters(
    State(state): State<AppState>,
    Json(req): Json<FilterQueryRequest>,
) -> Result<Json<ApiResponse<CriteriaView>>, AppError> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err(AppError::with_status(
            StatusCode::BAD_REQUEST,
            anyhow::anyhow!("query must not be empty"),
        ));
    }

    let current = {
        let mut dashboard = state.dashboard.write().await;
        dashboard.begin(Affordance::FilterQuery).map_err(state_err)?;
        dashboard.criteria().clone()
    };

    let analyst = state.analyst.clone();
    let dashboard = state.dashboard.clone();
    let view = tokio::spawn(async move {
        let outcome = analyst.suggest_filters(&query, &current).await;
        let mut dashboard = dashboard.write().await;
        dashboard.complete_filter_query(outcome);
        CriteriaView::from(&*dashboard)
    })
    .await?;

    Ok(Json(match view.query_error.clone() {
        Some(message) => ApiResponse::degraded(view, message),
        None => ApiResponse::success(view),
    }))
}

async fn analyze_security(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DetailSnapshot>>, AppError> {
    let security = find_by_id(&state.securities, id)
        .ok_or_else(|| AppError::not_found(id))?
        .clone();

    let ticket = {
        let mut dashboard = state.dashboard.write().await;
        if dashboard.selected() != Some(id) {
            dashboard.update(DashboardAction::Select(Box::new(security.clone())));
        }
        dashboard.begin(Affordance::Analysis).map_err(state_err)?
    };

    let analyst = state.analyst.clone();
    let dashboard = state.dashboard.clone();
    let snapshot = tokio::spawn(async move {
        let outcome = analyst.analyze(&security).await;
        let mut dashboard = dashboard.write().await;
        if !dashboard.complete_analysis(ticket, outcome) {
            return None;
        }
        dashboard.detail().map(|d| d.snapshot())
    })
    .await?
    .ok_or_else(|| {
        AppError::with_status(
            StatusCode::CONFLICT,
            anyhow::anyhow!("selection changed before analysis of {} completed", id),
        )
    })?;

    Ok(Json(match snapshot.error.clone() {
        Some(message) => ApiResponse::degraded(snapshot, message),
        None => ApiResponse::success(snapshot),
    }))
}
