//! Plain-text and JSON plant report built from a reading slice.

use std::fmt;

use serde::Serialize;

use crate::aggregate::daily::{DailyEntry, aggregate_daily};
use crate::aggregate::extremes::SpendExtremes;
use crate::aggregate::filter::{MonthFilter, MonthFilterError};
use crate::aggregate::hourly::{HourEntry, aggregate_by_hour};
use crate::aggregate::monthly::{MonthlyEntry, MonthlyMetric, aggregate_monthly};
use crate::aggregate::savings::{FlatSavings, SavingsProjection};
use crate::config::AnalysisConfig;
use crate::plant::efficiency::EfficiencySummary;
use crate::plant::types::Reading;

/// Every KPI the pipeline produces for one dataset.
///
/// Built in one pass per aggregator from the same readings and configuration,
/// so all sections are consistent with each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantReport {
    /// Readings the report was computed from.
    pub reading_count: usize,
    /// Month restriction applied to `daily` and `hourly`.
    pub filter: MonthFilter,
    /// Efficient versus inefficient share over all readings.
    pub efficiency: EfficiencySummary,
    /// Per-day totals, filtered.
    pub daily: Vec<DailyEntry>,
    /// Monthly cost totals.
    pub monthly_total_cost: Vec<MonthlyEntry>,
    /// Monthly mean cost per reading.
    pub monthly_average_cost: Vec<MonthlyEntry>,
    /// Monthly mean cost per cooling degree.
    pub monthly_average_cost_per_cooling_degree: Vec<MonthlyEntry>,
    /// Hour-of-day inefficiency profile, filtered.
    pub hourly: Vec<HourEntry>,
    /// Average monthly spend and extreme days.
    pub spend: SpendExtremes,
    /// Efficiency-linked savings.
    pub savings: SavingsProjection,
    /// Flat percentage savings.
    pub flat_savings: FlatSavings,
}

impl PlantReport {
    /// Builds the report, taking the month filter from `config.filter`.
    ///
    /// # Errors
    ///
    /// Returns a `MonthFilterError` if the configured filter is invalid.
    pub fn build(readings: &[Reading], config: &AnalysisConfig) -> Result<Self, MonthFilterError> {
        let filter = config.month_filter()?;
        Ok(Self::with_filter(readings, config, filter))
    }

    /// Builds the report with an explicit month filter, ignoring
    /// `config.filter`.
    ///
    /// # Arguments
    ///
    /// * `readings` - Reading sequence in any order
    /// * `config` - Thresholds and savings parameters
    /// * `filter` - Month restriction for the daily and hourly series
    pub fn with_filter(readings: &[Reading], config: &AnalysisConfig, filter: MonthFilter) -> Self {
        let thresholds = config.thresholds();

        Self {
            reading_count: readings.len(),
            efficiency: EfficiencySummary::classify(readings, &thresholds),
            daily: aggregate_daily(readings, &filter),
            monthly_total_cost: aggregate_monthly(readings, MonthlyMetric::TotalCost),
            monthly_average_cost: aggregate_monthly(readings, MonthlyMetric::AverageCost),
            monthly_average_cost_per_cooling_degree: aggregate_monthly(
                readings,
                MonthlyMetric::AverageCostPerCoolingDegree,
            ),
            hourly: aggregate_by_hour(readings, &thresholds, &filter),
            spend: SpendExtremes::find(readings),
            savings: SavingsProjection::project(
                readings,
                &thresholds,
                &config.savings.target_offsets,
            ),
            flat_savings: FlatSavings::project(readings, &config.savings.flat_reductions),
            filter,
        }
    }

    /// The monthly series for `metric`.
    pub fn monthly_series(&self, metric: MonthlyMetric) -> &[MonthlyEntry] {
        match metric {
            MonthlyMetric::TotalCost => &self.monthly_total_cost,
            MonthlyMetric::AverageCost => &self.monthly_average_cost,
            MonthlyMetric::AverageCostPerCoolingDegree => {
                &self.monthly_average_cost_per_cooling_degree
            }
        }
    }

    /// Hour with the largest inefficient share, first hour on ties.
    pub fn worst_hour(&self) -> Option<&HourEntry> {
        self.hourly.iter().fold(None, |worst: Option<&HourEntry>, e| match worst {
            Some(w) if w.inefficient_percent >= e.inefficient_percent => Some(w),
            _ => Some(e),
        })
    }
}

fn money(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("${v:.2}"))
}

impl fmt::Display for PlantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.efficiency;
        writeln!(f, "--- Plant Report ---")?;
        writeln!(f, "Readings:              {}", self.reading_count)?;
        writeln!(f, "Month filter:          {}", self.filter)?;
        writeln!(
            f,
            "Efficient hours:       {} / {} ({:.1}%)",
            e.efficient_hours, e.total_hours, e.efficient_percent
        )?;
        writeln!(
            f,
            "Inefficient hours:     {} ({:.1}%)",
            e.inefficient_hours, e.inefficient_percent
        )?;

        let s = &self.spend;
        writeln!(f, "Avg monthly spend:     ${:.2}", s.average_spend_per_month)?;
        match &s.highest_spend_day {
            Some(d) => writeln!(f, "Highest spend day:     {} (${:.2})", d.date, d.total)?,
            None => writeln!(f, "Highest spend day:     n/a")?,
        }
        match &s.lowest_spend_day {
            Some(d) => writeln!(f, "Lowest spend day:      {} (${:.2})", d.date, d.total)?,
            None => writeln!(f, "Lowest spend day:      n/a")?,
        }

        writeln!(f)?;
        writeln!(f, "Monthly cost:")?;
        if self.monthly_total_cost.is_empty() {
            writeln!(f, "  (no costed readings)")?;
        }
        for m in &self.monthly_total_cost {
            match (m.delta, m.trend) {
                (Some(delta), Some(trend)) => writeln!(
                    f,
                    "  {:>2}. {}  ${:>10.2}  {:+.2} ({})",
                    m.index,
                    m.month,
                    m.value,
                    delta,
                    trend.as_str()
                )?,
                _ => writeln!(f, "  {:>2}. {}  ${:>10.2}", m.index, m.month, m.value)?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Days:                  {}", self.daily.len())?;
        let filtered_cost: f64 = self.daily.iter().filter_map(|d| d.total_cost).sum();
        writeln!(f, "Cost in filter:        ${filtered_cost:.2}")?;
        match self.worst_hour() {
            Some(h) => writeln!(
                f,
                "Worst hour:            {:02}:00 ({:.1}% inefficient, n={})",
                h.hour, h.inefficient_percent, h.total
            )?,
            None => writeln!(f, "Worst hour:            n/a")?,
        }

        writeln!(f)?;
        if self.savings.has_sufficient_data() {
            writeln!(f, "Savings if efficient share rises:")?;
            for t in &self.savings.targets {
                writeln!(
                    f,
                    "  +{:.0} pts -> {:.1}%: {}/month",
                    t.offset,
                    t.target_percent,
                    money(Some(t.projected_savings))
                )?;
            }
        } else {
            writeln!(f, "Savings if efficient share rises: insufficient data")?;
        }
        write!(f, "Flat reductions:")?;
        for r in &self.flat_savings.reductions {
            write!(f, "  {:.0}% -> {}", r.reduction_percent, money(Some(r.savings)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_reading(ts: &str, t_in: f64, t_out: f64, kwh: f64, cost: f64) -> Reading {
        Reading::at(ts)
            .with_temperatures(t_in, t_out)
            .with_energy(kwh, cost)
    }

    fn make_readings() -> Vec<Reading> {
        vec![
            // cpk 2.5, cpcd 0.02 -> efficient
            make_reading("2025-01-01 08:00:00", 5.0, 10.0, 2.0, 0.1),
            // cpk 0.25 -> inefficient
            make_reading("2025-01-01 09:00:00", 5.0, 10.0, 20.0, 1.0),
            make_reading("2025-02-03 08:00:00", 5.0, 10.0, 2.0, 0.2),
        ]
    }

    #[test]
    fn empty_input_builds_zero_report() {
        let report = PlantReport::build(&[], &AnalysisConfig::default()).unwrap();
        assert_eq!(report.reading_count, 0);
        assert_eq!(report.efficiency, EfficiencySummary::default());
        assert!(report.daily.is_empty());
        assert!(report.monthly_total_cost.is_empty());
        assert!(report.spend.highest_spend_day.is_none());
        assert!(!report.savings.has_sufficient_data());
        assert!(report.worst_hour().is_none());
    }

    #[test]
    fn sections_are_populated() {
        let report = PlantReport::build(&make_readings(), &AnalysisConfig::default()).unwrap();
        assert_eq!(report.efficiency.total_hours, 3);
        assert_eq!(report.efficiency.efficient_hours, 2);
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.monthly_total_cost.len(), 2);
        assert_eq!(report.monthly_series(MonthlyMetric::AverageCost).len(), 2);
        assert_eq!(report.savings.targets.len(), 3);
        assert_eq!(report.flat_savings.reductions.len(), 3);
        assert_eq!(report.worst_hour().map(|h| h.hour), Some(9));
    }

    #[test]
    fn filter_restricts_daily_and_hourly_only() {
        let filter = MonthFilter::year_month("2025-02").unwrap();
        let report =
            PlantReport::with_filter(&make_readings(), &AnalysisConfig::default(), filter.clone());
        assert_eq!(report.filter, filter);
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.hourly.len(), 1);
        assert_eq!(report.monthly_total_cost.len(), 2);
        assert_eq!(report.efficiency.total_hours, 3);
    }

    #[test]
    fn invalid_configured_filter_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.filter.calendar_month = Some(13);
        assert!(PlantReport::build(&make_readings(), &config).is_err());
    }

    #[test]
    fn display_contains_key_lines() {
        let report = PlantReport::build(&make_readings(), &AnalysisConfig::default()).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("--- Plant Report ---"));
        assert!(text.contains("Efficient hours:       2 / 3"));
        assert!(text.contains("2025-01"));
        assert!(text.contains("Worst hour:            09:00"));
    }

    #[test]
    fn serializes_to_json() {
        let report = PlantReport::build(&make_readings(), &AnalysisConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["efficiency"]["total_hours"], 3);
        assert_eq!(json["filter"], "all");
    }
}
