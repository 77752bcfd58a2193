//! KPI analytics for hydronic chilled-water plants.
//!
//! Turns hourly plant readings (temperatures, pressures, energy and cost)
//! into per-reading metrics, an efficiency classification, daily, monthly and
//! hour-of-day series, spend extremes and savings projections.

/// Reducers over reading sequences.
pub mod aggregate;
pub mod config;
/// CSV loading and export.
pub mod io;
/// Reading model, derived metrics and efficiency rule.
pub mod plant;
pub mod report;
pub mod synth;

#[cfg(feature = "api")]
pub mod api;
