//! Read-only JSON API over a loaded reading set.
//!
//! Every request recomputes its summary from the shared readings:
//! - `/summary` full plant report
//! - `/efficiency` efficient versus inefficient share
//! - `/daily`, `/hourly` filtered series (`?month=YYYY-MM` or `?calendar_month=N`)
//! - `/monthly` one monthly series (`?metric=...`)
//! - `/spend` average monthly spend and extreme days
//! - `/savings` efficiency-linked savings projection

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::aggregate::filter::{MonthFilter, MonthFilterError};
use crate::config::AnalysisConfig;
use crate::plant::types::Reading;

/// Immutable application state shared across all request handlers.
///
/// Built once after loading and wrapped in `Arc`; no locks needed since all
/// data is read-only.
pub struct AppState {
    /// Loaded readings.
    pub readings: Vec<Reading>,
    /// Analysis configuration.
    pub config: AnalysisConfig,
    /// Filter used when a request names no month.
    pub default_filter: MonthFilter,
}

impl AppState {
    /// Creates the state, resolving the configured month filter.
    ///
    /// # Errors
    ///
    /// Returns an error if `config.filter` is invalid.
    pub fn new(readings: Vec<Reading>, config: AnalysisConfig) -> Result<Self, MonthFilterError> {
        let default_filter = config.month_filter()?;
        Ok(Self {
            readings,
            config,
            default_filter,
        })
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/efficiency", get(handlers::get_efficiency))
        .route("/daily", get(handlers::get_daily))
        .route("/monthly", get(handlers::get_monthly))
        .route("/hourly", get(handlers::get_hourly))
        .route("/spend", get(handlers::get_spend))
        .route("/savings", get(handlers::get_savings))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
