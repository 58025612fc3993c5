use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use screener::{export_csv, screen, EXPORT_CONTENT_TYPE, EXPORT_FILENAME};

use crate::AppState;

pub fn export_routes() -> Router<AppState> {
    Router::new().route("/api/export.csv", get(export))
}

/// Download the current table (filtered and sorted) as CSV.
async fn export(State(state): State<AppState>) -> impl IntoResponse {
    let (criteria, sort) = {
        let dashboard = state.dashboard.read().await;
        (dashboard.criteria().clone(), dashboard.sort().clone())
    };
    let view = screen(&state.securities, &criteria, &sort);
    let body = export_csv(&view);
    tracing::info!(rows = view.len().min(screener::EXPORT_ROW_LIMIT), "CSV export");

    (
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        body,
    )
}
