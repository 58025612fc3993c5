use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use market_core::{
    AiAnalyst, AiAssessment, AiError, CriteriaPatch, FilterCriteria, HealthTier, Market, MarketScope, Security,
};
use screener::{Affordance, QUERY_NOT_CONFIGURED_MSG};
use serde_json::{json, Value};
use tower::ServiceExt;
use universe_generator::UniverseGenerator;

use super::*;

/// Deterministic analyst: fixed patch and assessment, or always unconfigured.
struct StubAnalyst {
    configured: bool,
}

#[async_trait]
impl AiAnalyst for StubAnalyst {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn suggest_filters(&self, _query: &str, _current: &FilterCriteria) -> Result<CriteriaPatch, AiError> {
        if !self.configured {
            return Err(AiError::NotConfigured("OPENAI_API_KEY".into()));
        }
        Ok(CriteriaPatch {
            market: Some(MarketScope::In),
            max_debt: Some(1.0),
            ..CriteriaPatch::default()
        })
    }

    async fn analyze(&self, _security: &Security) -> Result<AiAssessment, AiError> {
        if !self.configured {
            return Err(AiError::NotConfigured("OPENAI_API_KEY".into()));
        }
        Ok(AiAssessment {
            health: HealthTier::Risky,
            insight: "Stub says risky.".to_string(),
        })
    }

    fn backend_name(&self) -> &'static str {
        "stub"
    }
}

fn test_state(configured: bool) -> AppState {
    let as_of = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let (securities, seed) = UniverseGenerator::with_seed(300, 42, as_of).generate();
    AppState::new(securities, seed, Arc::new(StubAnalyst { configured }))
}

fn app(state: &AppState) -> Router {
    build_router(state.clone(), None).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_reports_universe_and_ai_flag() {
    let state = test_state(false);
    let (status, body) = send(&app(&state), "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["universeSize"], 300);
    assert_eq!(body["data"]["seed"], 42);
    assert_eq!(body["data"]["aiEnabled"], false);
}

#[tokio::test]
async fn test_window_defaults_and_cap() {
    let state = test_state(true);
    let app = app(&state);

    let (_, body) = send(&app, "GET", "/api/securities", None).await;
    assert_eq!(body["data"]["matching"], 300);
    assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 50);

    let (_, body) = send(&app, "GET", "/api/securities?offset=280&limit=5000", None).await;
    assert_eq!(body["data"]["limit"], 500);
    assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_put_criteria_narrows_table_and_summary() {
    let state = test_state(true);
    let app = app(&state);
    let expected = state.securities.iter().filter(|s| s.market == Market::In).count();

    let (status, body) = send(&app, "PUT", "/api/criteria", Some(json!({ "market": "IN" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["criteria"]["market"], "IN");
    assert_eq!(body["data"]["criteria"]["maxPe"], 150.0);

    let (_, body) = send(&app, "GET", "/api/securities?limit=500", None).await;
    assert_eq!(body["data"]["matching"], expected);
    let rows = body["data"]["rows"].as_array().unwrap();
    assert!(rows.iter().all(|r| r["market"] == "IN"));

    let (_, body) = send(&app, "GET", "/api/summary", None).await;
    assert_eq!(body["data"]["filtered"], expected);
    assert_eq!(body["data"]["scopeLabel"], "India Only");
}

#[tokio::test]
async fn test_toggle_category_sort_and_reset() {
    let state = test_state(true);
    let app = app(&state);

    let (_, body) = send(
        &app,
        "POST",
        "/api/criteria/categories/toggle",
        Some(json!({ "category": "High Growth" })),
    )
    .await;
    assert_eq!(body["data"]["criteria"]["categories"], json!(["High Growth"]));

    let (_, body) = send(&app, "POST", "/api/sort/toggle", Some(json!({ "key": "peRatio" }))).await;
    assert_eq!(
        body["data"]["sort"],
        json!([
            { "key": "healthRank", "direction": "asc" },
            { "key": "peRatio", "direction": "asc" }
        ])
    );

    let (_, body) = send(&app, "POST", "/api/criteria/reset", None).await;
    assert_eq!(body["data"]["criteria"]["categories"], json!([]));
    // Sort is not part of the filter reset
    assert_eq!(body["data"]["sort"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_security_is_404() {
    let state = test_state(true);
    let (status, body) = send(&app(&state), "GET", &format!("/api/securities/{}", uuid::Uuid::nil()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_ai_filters_merge_patch() {
    let state = test_state(true);
    let app = app(&state);
    send(&app, "PUT", "/api/criteria", Some(json!({ "search": "bank" }))).await;

    let (status, body) = send(&app, "POST", "/api/ai/filters", Some(json!({ "query": "safe indian banks" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["criteria"]["market"], "IN");
    assert_eq!(body["data"]["criteria"]["maxDebt"], 1.0);
    assert_eq!(body["data"]["criteria"]["search"], "bank");
    assert!(!state.dashboard.read().await.is_pending(Affordance::FilterQuery));
}

#[tokio::test]
async fn test_ai_filters_without_key_keep_criteria() {
    let state = test_state(false);
    let app = app(&state);

    let (status, body) = send(&app, "POST", "/api/ai/filters", Some(json!({ "query": "indian stocks" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], QUERY_NOT_CONFIGURED_MSG);
    assert_eq!(body["data"]["criteria"]["market"], "ALL");
}

#[tokio::test]
async fn test_concurrent_filter_query_is_rejected() {
    let state = test_state(true);
    state.dashboard.write().await.begin(Affordance::FilterQuery).unwrap();

    let (status, _) = send(&app(&state), "POST", "/api/ai/filters", Some(json!({ "query": "anything" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_analysis_overrides_detail_only() {
    let state = test_state(true);
    let app = app(&state);
    let target = state.securities[0].clone();

    let (status, body) = send(&app, "POST", &format!("/api/securities/{}/analyze", target.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["health"], "Risky");
    assert_eq!(body["data"]["insight"], "Stub says risky.");
    assert_eq!(body["data"]["aiGenerated"], true);

    // Re-opening the same security keeps the override; the universe is untouched
    let (_, body) = send(&app, "GET", &format!("/api/securities/{}", target.id), None).await;
    assert_eq!(body["data"]["insight"], "Stub says risky.");
    assert_eq!(body["data"]["security"]["analysis"]["insight"], target.analysis.insight.as_str());
    assert_eq!(state.securities[0].analysis, target.analysis);
}

#[tokio::test]
async fn test_analysis_without_key_reports_inline() {
    let state = test_state(false);
    let target = state.securities[3].id;

    let (status, body) = send(&app(&state), "POST", &format!("/api/securities/{}/analyze", target), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], screener::ANALYSIS_NOT_CONFIGURED_MSG);
    assert_eq!(body["data"]["aiGenerated"], false);
}

#[tokio::test]
async fn test_export_csv() {
    let state = test_state(true);
    let response = app(&state)
        .oneshot(Request::builder().uri("/api/export.csv").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv;charset=utf-8");
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("market_analysis_export.csv"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("Symbol,Name,Market,Category,Price,P/E,Earn Growth,Rev Growth,Debt/Eq,Insight\n"));
    assert_eq!(text.lines().count(), 301);
}

#[tokio::test]
async fn test_reopened_detail_cannot_start_second_analysis() {
    let state = test_state(true);
    let app = app(&state);
    let id = state.securities[1].id;

    send(&app, "GET", &format!("/api/securities/{}", id), None).await;
    // An analysis for this view is still outstanding
    state.dashboard.write().await.begin(Affordance::Analysis).unwrap();

    send(&app, "DELETE", &format!("/api/securities/{}", id), None).await;
    let (status, _) = send(&app, "GET", &format!("/api/securities/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", &format!("/api/securities/{}/analyze", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert!(state.dashboard.read().await.is_pending(Affordance::Analysis));
}
