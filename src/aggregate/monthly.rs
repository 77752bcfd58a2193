//! Month-level cost series with month-over-month deltas.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::stats::MeanAccumulator;
use crate::plant::metrics::DerivedMetrics;
use crate::plant::types::Reading;

/// Quantity reduced per month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyMetric {
    /// Sum of energy cost.
    #[default]
    TotalCost,
    /// Mean energy cost per reading.
    AverageCost,
    /// Mean cost per cooling degree.
    AverageCostPerCoolingDegree,
}

impl MonthlyMetric {
    /// All metrics, in report order.
    pub const ALL: [Self; 3] = [
        Self::TotalCost,
        Self::AverageCost,
        Self::AverageCostPerCoolingDegree,
    ];

    /// Stable snake_case name used in CSV file names and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalCost => "total_cost",
            Self::AverageCost => "average_cost",
            Self::AverageCostPerCoolingDegree => "average_cost_per_cooling_degree",
        }
    }

    fn sample(&self, reading: &Reading) -> Option<f64> {
        match self {
            Self::TotalCost | Self::AverageCost => reading.energy_cost_usd,
            Self::AverageCostPerCoolingDegree => {
                DerivedMetrics::compute(reading).cost_per_cooling_degree
            }
        }
    }

    fn reduce(&self, acc: &MeanAccumulator) -> Option<f64> {
        match self {
            Self::TotalCost => acc.sum(),
            Self::AverageCost | Self::AverageCostPerCoolingDegree => acc.mean(),
        }
    }
}

impl fmt::Display for MonthlyMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonthlyMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(MonthlyMetric::as_str).collect();
                format!("unknown monthly metric \"{s}\", expected one of: {}", names.join(", "))
            })
    }
}

/// Direction of a month-over-month change, from a cost point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Value went up (spending more).
    Worse,
    /// Value went down.
    Better,
    /// No change.
    Flat,
}

impl Trend {
    /// Lowercase name used in CSV output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worse => "worse",
            Self::Better => "better",
            Self::Flat => "flat",
        }
    }

    /// Classifies a signed delta.
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Worse
        } else if delta < 0.0 {
            Self::Better
        } else {
            Self::Flat
        }
    }
}

/// One month in a monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyEntry {
    /// `YYYY-MM` month key.
    pub month: String,
    /// 1-based position in the sorted series.
    pub index: usize,
    /// Reduced value for the month.
    pub value: f64,
    /// `value - previous.value`, `None` for the first month.
    pub delta: Option<f64>,
    /// Direction of `delta`.
    pub trend: Option<Trend>,
}

/// Groups readings by `YYYY-MM` and reduces them with `metric`.
///
/// Months with no usable sample are not emitted. Output is sorted by month
/// key, indexed from 1, and each entry after the first carries its delta
/// from the previous entry. Grouping is order independent, so any
/// permutation of `readings` gives the same series.
pub fn aggregate_monthly(readings: &[Reading], metric: MonthlyMetric) -> Vec<MonthlyEntry> {
    let mut by_month: BTreeMap<&str, MeanAccumulator> = BTreeMap::new();

    for r in readings {
        let Some(month) = r.month_key() else { continue };
        let sample = metric.sample(r);
        if sample.is_some_and(f64::is_finite) {
            by_month.entry(month).or_default().push(sample);
        }
    }

    let mut series: Vec<MonthlyEntry> = Vec::with_capacity(by_month.len());
    for (month, acc) in by_month {
        let Some(value) = metric.reduce(&acc) else { continue };
        let delta = series.last().map(|prev| value - prev.value);
        series.push(MonthlyEntry {
            month: month.to_string(),
            index: series.len() + 1,
            value,
            delta,
            trend: delta.map(Trend::from_delta),
        });
    }
    series
}

/// Monthly cost totals without deltas, keyed by `YYYY-MM`.
///
/// Readings without a usable cost are skipped.
pub fn monthly_cost_totals(readings: &[Reading]) -> BTreeMap<String, f64> {
    aggregate_monthly(readings, MonthlyMetric::TotalCost)
        .into_iter()
        .map(|e| (e.month, e.value))
        .collect()
}
