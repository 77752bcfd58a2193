//! Average monthly spend and the highest/lowest spending days.

use std::collections::HashMap;

use serde::Serialize;

use super::stats::{mean_or_zero, ordered_sum};
use crate::plant::calendar;
use crate::plant::types::Reading;

/// Total spend on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySpend {
    /// `YYYY-MM-DD` day key.
    pub date: String,
    /// Summed energy cost for the day.
    pub total: f64,
}

/// Spend statistics across the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpendExtremes {
    /// Mean of the per-month cost totals.
    pub average_spend_per_month: f64,
    /// Day with the largest total cost.
    pub highest_spend_day: Option<DaySpend>,
    /// Day with the smallest total cost.
    pub lowest_spend_day: Option<DaySpend>,
}

/// Cost samples keyed by string, remembering first-seen key order.
#[derive(Default)]
struct FirstSeenTotals {
    order: Vec<(String, Vec<f64>)>,
    index: HashMap<String, usize>,
}

impl FirstSeenTotals {
    fn add(&mut self, key: &str, amount: f64) {
        match self.index.get(key) {
            Some(&i) => self.order[i].1.push(amount),
            None => {
                self.index.insert(key.to_string(), self.order.len());
                self.order.push((key.to_string(), vec![amount]));
            }
        }
    }

    /// Per-key totals in first-seen key order.
    fn totals(&self) -> Vec<(&str, f64)> {
        self.order
            .iter()
            .map(|(key, samples)| (key.as_str(), ordered_sum(samples)))
            .collect()
    }
}

impl SpendExtremes {
    /// Computes average monthly spend and the extreme days.
    ///
    /// Readings without a usable cost or without a full `YYYY-MM-DD` date are
    /// skipped. Days are scanned in the order they first appear in
    /// `readings`, keeping a strictly greater (or smaller) total only, so
    /// the first day reaching the maximum or minimum wins ties.
    ///
    /// Empty input yields zero average spend and no extremes.
    pub fn find(readings: &[Reading]) -> Self {
        let mut days = FirstSeenTotals::default();
        let mut months = FirstSeenTotals::default();

        for r in readings {
            let Some(cost) = r.cost() else { continue };
            let Some(day) = r.day_key().filter(|d| calendar::is_full_date(d)) else {
                continue;
            };
            let Some(month) = r.month_key() else { continue };
            days.add(day, cost);
            months.add(month, cost);
        }

        let monthly: Vec<f64> = months.totals().into_iter().map(|(_, total)| total).collect();
        let day_totals = days.totals();

        let mut highest: Option<(&str, f64)> = None;
        let mut lowest: Option<(&str, f64)> = None;
        for &entry in &day_totals {
            if highest.is_none_or(|h| entry.1 > h.1) {
                highest = Some(entry);
            }
            if lowest.is_none_or(|l| entry.1 < l.1) {
                lowest = Some(entry);
            }
        }

        let to_spend = |(date, total): (&str, f64)| DaySpend {
            date: date.to_string(),
            total,
        };

        Self {
            average_spend_per_month: mean_or_zero(&monthly),
            highest_spend_day: highest.map(to_spend),
            lowest_spend_day: lowest.map(to_spend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costed(ts: &str, cost: f64) -> Reading {
        let mut r = Reading::at(ts);
        r.energy_cost_usd = Some(cost);
        r
    }

    #[test]
    fn empty_input() {
        let s = SpendExtremes::find(&[]);
        assert_eq!(s, SpendExtremes::default());
    }

    #[test]
    fn average_of_monthly_totals() {
        let readings = vec![
            costed("2025-01-01 00:00:00", 4.0),
            costed("2025-01-02 00:00:00", 6.0),
            costed("2025-02-01 00:00:00", 20.0),
            costed("2025-03-01 00:00:00", 30.0),
        ];
        let s = SpendExtremes::find(&readings);
        assert_eq!(s.average_spend_per_month, 20.0);
        assert_eq!(
            s.highest_spend_day,
            Some(DaySpend {
                date: "2025-03-01".to_string(),
                total: 30.0
            })
        );
        assert_eq!(s.lowest_spend_day.map(|d| d.date).as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn day_totals_sum_before_comparing() {
        let readings = vec![
            costed("2025-01-01 00:00:00", 3.0),
            costed("2025-01-02 00:00:00", 2.0),
            costed("2025-01-02 01:00:00", 2.0),
        ];
        let s = SpendExtremes::find(&readings);
        assert_eq!(s.highest_spend_day.map(|d| d.total), Some(4.0));
        assert_eq!(s.lowest_spend_day.map(|d| d.total), Some(3.0));
    }

    #[test]
    fn first_seen_day_wins_ties() {
        let readings = vec![
            costed("2025-01-03 00:00:00", 5.0),
            costed("2025-01-01 00:00:00", 5.0),
            costed("2025-01-02 00:00:00", 5.0),
        ];
        let s = SpendExtremes::find(&readings);
        assert_eq!(s.highest_spend_day.map(|d| d.date).as_deref(), Some("2025-01-03"));
        assert_eq!(s.lowest_spend_day.map(|d| d.date).as_deref(), Some("2025-01-03"));
    }

    #[test]
    fn skips_unusable_rows() {
        let mut nan = Reading::at("2025-01-05 00:00:00");
        nan.energy_cost_usd = Some(f64::NAN);
        let readings = vec![
            nan,
            Reading::at("2025-01-06 00:00:00"),
            costed("2025-01 00:00:00", 100.0),
            costed("2025-01-07 00:00:00", 1.0),
        ];
        let s = SpendExtremes::find(&readings);
        assert_eq!(s.average_spend_per_month, 1.0);
        assert_eq!(s.highest_spend_day.map(|d| d.date).as_deref(), Some("2025-01-07"));
    }

    #[test]
    fn fractional_totals_ignore_row_order() {
        let readings = vec![
            costed("2025-01-01 00:00:00", 0.1),
            costed("2025-01-01 01:00:00", 0.2),
            costed("2025-01-01 02:00:00", 0.3),
            costed("2025-01-02 00:00:00", 0.6),
        ];
        let mut reversed = readings.clone();
        reversed.reverse();

        let forward = SpendExtremes::find(&readings);
        let backward = SpendExtremes::find(&reversed);
        assert_eq!(forward.average_spend_per_month, backward.average_spend_per_month);
        assert_eq!(
            forward.highest_spend_day.map(|d| d.total),
            backward.highest_spend_day.map(|d| d.total)
        );
        assert_eq!(
            forward.lowest_spend_day.map(|d| d.total),
            backward.lowest_spend_day.map(|d| d.total)
        );
    }
}
