/// Timestamp slicing into day, month and hour keys.
pub mod calendar;
pub mod efficiency;
/// Per-reading KPI derivation.
pub mod metrics;
pub mod types;
