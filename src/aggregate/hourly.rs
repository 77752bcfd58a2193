//! Hour-of-day inefficiency profile.

use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::MonthFilter;
use crate::plant::efficiency::EfficiencyThresholds;
use crate::plant::types::Reading;

/// Inefficiency share for one hour of the day, pooled over all days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourEntry {
    /// Hour of day, `0..=23`.
    pub hour: u8,
    /// Readings in this hour with both efficiency ratios available.
    pub total: usize,
    /// Readings in this hour failing the efficiency rule.
    pub inefficient: usize,
    /// `100 * inefficient / total`.
    pub inefficient_percent: f64,
}

impl HourEntry {
    /// `100 - inefficient_percent`.
    pub fn efficient_percent(&self) -> f64 {
        100.0 - self.inefficient_percent
    }
}

/// Buckets readings by hour of day and measures the inefficient share.
///
/// Only readings with a parseable hour and both efficiency ratios count.
/// Hours with no such reading are omitted rather than reported as 0 %. The
/// result is sorted by hour.
pub fn aggregate_by_hour(
    readings: &[Reading],
    thresholds: &EfficiencyThresholds,
    filter: &MonthFilter,
) -> Vec<HourEntry> {
    // hour -> (total, inefficient)
    let mut by_hour: BTreeMap<u8, (usize, usize)> = BTreeMap::new();

    for r in filter.apply(readings) {
        let Some(hour) = r.hour() else { continue };
        let Some(efficient) = thresholds.classify_reading(r) else {
            continue;
        };
        let (total, inefficient) = by_hour.entry(hour).or_default();
        *total += 1;
        if !efficient {
            *inefficient += 1;
        }
    }

    by_hour
        .into_iter()
        .map(|(hour, (total, inefficient))| HourEntry {
            hour,
            total,
            inefficient,
            inefficient_percent: if total > 0 {
                100.0 * inefficient as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect()
}
