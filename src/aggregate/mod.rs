//! Reducers over reading sequences.
//!
//! Every aggregator is a pure function of its inputs and is independent of the
//! others; they share only the per-reading metrics, the efficiency rule and
//! the month filter.

/// Per-day totals and averages.
pub mod daily;
/// Highest and lowest spending days.
pub mod extremes;
pub mod filter;
/// Hour-of-day inefficiency profile.
pub mod hourly;
pub mod monthly;
pub mod savings;
pub mod stats;

pub use daily::{DailyEntry, aggregate_daily};
pub use extremes::{DaySpend, SpendExtremes};
pub use filter::{MonthFilter, MonthFilterError};
pub use hourly::{HourEntry, aggregate_by_hour};
pub use monthly::{MonthlyEntry, MonthlyMetric, Trend, aggregate_monthly};
pub use savings::{FlatSavings, SavingsProjection, SavingsTarget};
