//! Two-threshold efficiency rule and the plant-wide efficiency summary.

use serde::{Deserialize, Serialize};

use super::metrics::DerivedMetrics;
use super::types::Reading;

/// Default lower bound on cooling per kWh (°C/kWh).
pub const DEFAULT_COOLING_PER_KWH_THRESHOLD: f64 = 0.5;
/// Default upper bound on cost per cooling degree (USD/°C).
pub const DEFAULT_COST_PER_COOLING_DEGREE_THRESHOLD: f64 = 0.07;

/// Thresholds for classifying a reading as efficient.
///
/// A reading is efficient when it transfers enough heat per kWh *and* does
/// not overpay per degree:
/// `cooling_per_kwh > cooling_per_kwh_threshold` and
/// `cost_per_cooling_degree < cost_per_cooling_degree_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyThresholds {
    /// Strict lower bound on cooling per kWh.
    pub cooling_per_kwh: f64,
    /// Strict upper bound on cost per cooling degree.
    pub cost_per_cooling_degree: f64,
}

impl Default for EfficiencyThresholds {
    fn default() -> Self {
        Self {
            cooling_per_kwh: DEFAULT_COOLING_PER_KWH_THRESHOLD,
            cost_per_cooling_degree: DEFAULT_COST_PER_COOLING_DEGREE_THRESHOLD,
        }
    }
}

impl EfficiencyThresholds {
    /// Classifies one reading's metrics.
    ///
    /// # Returns
    ///
    /// * `Some(true)` / `Some(false)` - the reading is in the efficiency
    ///   population and does / does not pass both thresholds
    /// * `None` - either ratio is unavailable, so the reading is neither
    ///   efficient nor inefficient
    pub fn is_efficient(&self, metrics: &DerivedMetrics) -> Option<bool> {
        let (cooling_per_kwh, cost_per_degree) = metrics.efficiency_ratios()?;
        Some(
            cooling_per_kwh > self.cooling_per_kwh
                && cost_per_degree < self.cost_per_cooling_degree,
        )
    }

    /// Shorthand for deriving the metrics of `reading` and classifying them.
    pub fn classify_reading(&self, reading: &Reading) -> Option<bool> {
        self.is_efficient(&DerivedMetrics::compute(reading))
    }
}

/// Share of efficient versus inefficient readings ("hours").
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EfficiencySummary {
    /// Readings with both efficiency ratios available.
    pub total_hours: usize,
    /// Readings passing both thresholds.
    pub efficient_hours: usize,
    /// `total_hours - efficient_hours`.
    pub inefficient_hours: usize,
    /// `100 * efficient_hours / total_hours`, or 0 with no population.
    pub efficient_percent: f64,
    /// `100 - efficient_percent`, or 0 for empty input.
    pub inefficient_percent: f64,
}

impl EfficiencySummary {
    /// Classifies every reading and tallies the population.
    ///
    /// Empty input yields the all-zero summary. A non-empty input whose
    /// readings all lack a ratio has `total_hours == 0`,
    /// `efficient_percent == 0` and `inefficient_percent == 100`.
    pub fn classify(readings: &[Reading], thresholds: &EfficiencyThresholds) -> Self {
        if readings.is_empty() {
            return Self::default();
        }

        let mut total_hours = 0_usize;
        let mut efficient_hours = 0_usize;

        for verdict in readings.iter().filter_map(|r| thresholds.classify_reading(r)) {
            total_hours += 1;
            if verdict {
                efficient_hours += 1;
            }
        }

        let efficient_percent = if total_hours > 0 {
            100.0 * efficient_hours as f64 / total_hours as f64
        } else {
            0.0
        };

        Self {
            total_hours,
            efficient_hours,
            inefficient_hours: total_hours.saturating_sub(efficient_hours),
            efficient_percent,
            inefficient_percent: 100.0 - efficient_percent,
        }
    }
}
