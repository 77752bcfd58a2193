//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, FilterQuery, FilteredSeries, MonthlyQuery, MonthlySeries};
use crate::aggregate::daily::{DailyEntry, aggregate_daily};
use crate::aggregate::extremes::SpendExtremes;
use crate::aggregate::hourly::{HourEntry, aggregate_by_hour};
use crate::aggregate::monthly::{MonthlyEntry, aggregate_monthly};
use crate::aggregate::savings::SavingsProjection;
use crate::plant::efficiency::EfficiencySummary;
use crate::report::PlantReport;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// `GET /summary` → 200 + `PlantReport` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<PlantReport> {
    Json(PlantReport::with_filter(
        &state.readings,
        &state.config,
        state.default_filter.clone(),
    ))
}

/// `GET /efficiency` → 200 + `EfficiencySummary` JSON
pub async fn get_efficiency(State(state): State<Arc<AppState>>) -> Json<EfficiencySummary> {
    Json(EfficiencySummary::classify(
        &state.readings,
        &state.config.thresholds(),
    ))
}

/// Returns the daily series.
///
/// `GET /daily` → configured filter
/// `GET /daily?month=2025-01` → that month only
/// `GET /daily?calendar_month=13` → 400 + `ErrorResponse`
pub async fn get_daily(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<FilteredSeries<DailyEntry>>, ApiError> {
    let filter = query.resolve(&state.default_filter).map_err(bad_request)?;
    let entries = aggregate_daily(&state.readings, &filter);
    Ok(Json(FilteredSeries { filter, entries }))
}

/// Returns one monthly series.
///
/// `GET /monthly` → total cost
/// `GET /monthly?metric=median` → 400 + `ErrorResponse`
pub async fn get_monthly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<MonthlySeries<MonthlyEntry>>, ApiError> {
    let metric = query.resolve().map_err(bad_request)?;
    let entries = aggregate_monthly(&state.readings, metric);
    Ok(Json(MonthlySeries { metric, entries }))
}

/// Returns the hour-of-day inefficiency profile.
///
/// Accepts the same filter parameters as `/daily`.
pub async fn get_hourly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<FilteredSeries<HourEntry>>, ApiError> {
    let filter = query.resolve(&state.default_filter).map_err(bad_request)?;
    let entries = aggregate_by_hour(&state.readings, &state.config.thresholds(), &filter);
    Ok(Json(FilteredSeries { filter, entries }))
}

/// `GET /spend` → 200 + `SpendExtremes` JSON
pub async fn get_spend(State(state): State<Arc<AppState>>) -> Json<SpendExtremes> {
    Json(SpendExtremes::find(&state.readings))
}

/// `GET /savings` → 200 + `SavingsProjection` JSON
pub async fn get_savings(State(state): State<Arc<AppState>>) -> Json<SavingsProjection> {
    Json(SavingsProjection::project(
        &state.readings,
        &state.config.thresholds(),
        &state.config.savings.target_offsets,
    ))
}
