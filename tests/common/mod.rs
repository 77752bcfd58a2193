//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use hydronic_kpi::plant::types::Reading;

/// Absolute tolerance for float comparisons.
pub const EPS: f64 = 1e-9;

/// Returns `true` when `a` and `b` differ by at most [`EPS`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS
}

/// Reading with temperatures, energy and cost set.
pub fn reading(ts: &str, t_in: f64, t_out: f64, kwh: f64, cost: f64) -> Reading {
    Reading::at(ts)
        .with_temperatures(t_in, t_out)
        .with_energy(kwh, cost)
}

/// Reading with only a cost set.
pub fn costed(ts: &str, cost: f64) -> Reading {
    let mut r = Reading::at(ts);
    r.energy_cost_usd = Some(cost);
    r
}

/// Efficient under default thresholds: cpk 2.5, cpcd 0.02.
pub fn efficient(ts: &str) -> Reading {
    reading(ts, 5.0, 10.0, 2.0, 0.1)
}

/// Inefficient under default thresholds: cpk 0.25.
pub fn inefficient(ts: &str) -> Reading {
    reading(ts, 5.0, 10.0, 20.0, 1.0)
}

/// Three months with whole-dollar costs, totals 10, 20 and 30.
pub fn three_month_costs() -> Vec<Reading> {
    vec![
        costed("2025-01-03 10:00:00", 4.0),
        costed("2025-01-17 11:00:00", 6.0),
        costed("2025-02-02 10:00:00", 20.0),
        costed("2025-03-09 10:00:00", 12.0),
        costed("2025-03-10 10:00:00", 18.0),
    ]
}

/// Two months of fractional costs whose float sums depend on addition order.
pub fn fractional_costs() -> Vec<Reading> {
    vec![
        costed("2025-01-03 10:00:00", 0.1),
        costed("2025-01-03 11:00:00", 0.2),
        costed("2025-01-04 10:00:00", 0.3),
        costed("2025-01-05 10:00:00", 0.7),
        costed("2025-02-02 10:00:00", 0.3),
        costed("2025-02-02 11:00:00", 0.6),
        costed("2025-02-09 10:00:00", 0.1),
        costed("2025-02-10 10:00:00", 0.3),
    ]
}

/// Header line of the reading CSV schema.
pub const CSV_HEADER: &str = "timestamp,pressure_in_kPa,pressure_out_kPa,temperature_in_C,\
temperature_out_C,valve_opening_percent,energy_kWh,energy_cost_USD";
