//! Savings projections tied to the efficient-hour share.
//!
//! Both projections work from the current average monthly spend (the mean of
//! monthly cost totals). They are estimates for presentation, not forecasts.

use serde::Serialize;

use super::monthly::monthly_cost_totals;
use super::stats::mean_or_zero;
use crate::plant::efficiency::{EfficiencySummary, EfficiencyThresholds};
use crate::plant::types::Reading;

/// Percentage-point increases of the efficient-hour share to project.
pub const DEFAULT_TARGET_OFFSETS: [f64; 3] = [5.0, 10.0, 20.0];
/// Flat percentage reductions of monthly spend to project.
pub const DEFAULT_FLAT_REDUCTIONS: [f64; 3] = [5.0, 10.0, 20.0];

/// Mean of the per-month cost totals, `0.0` with no costed readings.
pub fn average_monthly_spend(readings: &[Reading]) -> f64 {
    let totals: Vec<f64> = monthly_cost_totals(readings).into_values().collect();
    mean_or_zero(&totals)
}

/// Savings if the efficient-hour share rose by `offset` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsTarget {
    /// Percentage-point increase requested.
    pub offset: f64,
    /// `min(efficient_percent + offset, 100)`.
    pub target_percent: f64,
    /// Projected monthly saving (USD).
    pub projected_savings: f64,
}

/// Efficiency-linked savings projection.
///
/// Assumes monthly cost shrinks in proportion to the relative growth of the
/// efficient-hour share:
/// `savings = spend * (target - current) / current`.
/// That linear scaling is a modeling simplification; cost is not known to
/// respond to efficiency this way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsProjection {
    /// Average monthly spend today (USD).
    pub current_monthly_spend: f64,
    /// Current efficient-hour share (%).
    pub efficient_percent: f64,
    /// One projection per requested offset, in request order.
    pub targets: Vec<SavingsTarget>,
}

impl SavingsProjection {
    /// Projects savings for each percentage-point `offsets` entry.
    ///
    /// When either the current spend or the efficient share is zero, every
    /// projection is zero and [`has_sufficient_data`](Self::has_sufficient_data)
    /// returns `false`.
    pub fn project(
        readings: &[Reading],
        thresholds: &EfficiencyThresholds,
        offsets: &[f64],
    ) -> Self {
        let efficient_percent = EfficiencySummary::classify(readings, thresholds).efficient_percent;
        Self::from_parts(average_monthly_spend(readings), efficient_percent, offsets)
    }

    /// Projects from an already known spend and efficient share.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydronic_kpi::aggregate::savings::SavingsProjection;
    ///
    /// let p = SavingsProjection::from_parts(100.0, 50.0, &[20.0]);
    /// assert_eq!(p.targets[0].target_percent, 70.0);
    /// assert!((p.targets[0].projected_savings - 40.0).abs() < 1e-9);
    /// ```
    pub fn from_parts(current_monthly_spend: f64, efficient_percent: f64, offsets: &[f64]) -> Self {
        let has_basis = current_monthly_spend != 0.0 && efficient_percent != 0.0;

        let targets = offsets
            .iter()
            .map(|&offset| {
                let target_percent = (efficient_percent + offset).min(100.0);
                let gain = if has_basis && target_percent > efficient_percent {
                    (target_percent - efficient_percent) / efficient_percent
                } else {
                    0.0
                };
                SavingsTarget {
                    offset,
                    target_percent,
                    projected_savings: current_monthly_spend * gain,
                }
            })
            .collect();

        Self {
            current_monthly_spend,
            efficient_percent,
            targets,
        }
    }

    /// `false` when the projection is all zeros for lack of spend or
    /// efficient hours, which callers should present as "insufficient data".
    pub fn has_sufficient_data(&self) -> bool {
        self.current_monthly_spend != 0.0 && self.efficient_percent != 0.0
    }
}

/// Saving for a flat percentage cut of monthly spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatSaving {
    /// Reduction applied (%).
    pub reduction_percent: f64,
    /// `current_monthly_spend * reduction_percent / 100`.
    pub savings: f64,
}

/// Savings from fixed percentage reductions of average monthly spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatSavings {
    /// Average monthly spend today (USD).
    pub current_monthly_spend: f64,
    /// One entry per requested reduction, in request order.
    pub reductions: Vec<FlatSaving>,
}

impl FlatSavings {
    /// Applies each percentage in `reductions` to the average monthly spend.
    pub fn project(readings: &[Reading], reductions: &[f64]) -> Self {
        let current_monthly_spend = average_monthly_spend(readings);
        Self {
            current_monthly_spend,
            reductions: reductions
                .iter()
                .map(|&pct| FlatSaving {
                    reduction_percent: pct,
                    savings: current_monthly_spend * pct / 100.0,
                })
                .collect(),
        }
    }
}
