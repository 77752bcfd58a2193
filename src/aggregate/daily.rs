//! Per-day cost totals and cost-per-cooling-degree averages.

use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::MonthFilter;
use super::stats::MeanAccumulator;
use crate::plant::metrics::DerivedMetrics;
use crate::plant::types::Reading;

/// Aggregates for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    /// `YYYY-MM-DD` day key.
    pub day: String,
    /// Readings grouped into this day.
    pub reading_count: usize,
    /// Sum of usable energy costs, `None` if the day has none.
    pub total_cost: Option<f64>,
    /// Mean cost per cooling degree, `None` if no reading had one.
    pub avg_cost_per_cooling_degree: Option<f64>,
}

#[derive(Default)]
struct DayBucket {
    readings: usize,
    cost: MeanAccumulator,
    cost_per_degree: MeanAccumulator,
}

/// Groups readings by day and reduces cost and cost per cooling degree.
///
/// Readings without a date are skipped. Unusable costs are left out of the
/// sum rather than counted as zero. The result is sorted by day ascending.
///
/// # Arguments
///
/// * `readings` - Reading sequence in any order
/// * `filter` - Month restriction applied before grouping
pub fn aggregate_daily(readings: &[Reading], filter: &MonthFilter) -> Vec<DailyEntry> {
    let mut by_day: BTreeMap<&str, DayBucket> = BTreeMap::new();

    for r in filter.apply(readings) {
        let Some(day) = r.day_key() else { continue };
        let bucket = by_day.entry(day).or_default();
        bucket.readings += 1;
        bucket.cost.push(r.energy_cost_usd);
        bucket
            .cost_per_degree
            .push(DerivedMetrics::compute(r).cost_per_cooling_degree);
    }

    by_day
        .into_iter()
        .map(|(day, bucket)| DailyEntry {
            day: day.to_string(),
            reading_count: bucket.readings,
            total_cost: bucket.cost.sum(),
            avg_cost_per_cooling_degree: bucket.cost_per_degree.mean(),
        })
        .collect()
}
