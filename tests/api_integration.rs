//! API routes over a synthetic plant, exercised through the public router.
#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::util::ServiceExt;

use hydronic_kpi::api::{AppState, router};
use hydronic_kpi::config::AnalysisConfig;
use hydronic_kpi::synth::demo_readings;

fn make_state(config: AnalysisConfig) -> Arc<AppState> {
    Arc::new(AppState::new(demo_readings(45, 3), config).unwrap())
}

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router(state).oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn every_route_answers() {
    let state = make_state(AnalysisConfig::default());
    for uri in [
        "/summary",
        "/efficiency",
        "/daily",
        "/monthly",
        "/hourly",
        "/spend",
        "/savings",
    ] {
        let (status, _) = get(state.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn configured_filter_is_default_for_series() {
    let mut config = AnalysisConfig::default();
    config.filter.month = Some("2025-02".to_string());
    let state = make_state(config);

    let (_, daily) = get(state.clone(), "/daily").await;
    assert_eq!(daily["entries"].as_array().map(Vec::len), Some(14));

    let (_, daily) = get(state, "/daily?month=2025-01").await;
    assert_eq!(daily["entries"].as_array().map(Vec::len), Some(31));
}

#[tokio::test]
async fn efficiency_matches_summary() {
    let state = make_state(AnalysisConfig::lenient());
    let (_, efficiency) = get(state.clone(), "/efficiency").await;
    let (_, summary) = get(state, "/summary").await;
    assert_eq!(efficiency, summary["efficiency"]);
}

#[tokio::test]
async fn hourly_profile_has_24_hours() {
    let state = make_state(AnalysisConfig::default());
    let (status, json) = get(state, "/hourly").await;
    assert_eq!(status, StatusCode::OK);
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 24);
    assert_eq!(entries[0]["hour"], 0);
    assert_eq!(entries[23]["hour"], 23);
}

#[tokio::test]
async fn bad_metric_is_400_with_error_body() {
    let state = make_state(AnalysisConfig::default());
    let (status, json) = get(state, "/monthly?metric=peak").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("total_cost"));
}
