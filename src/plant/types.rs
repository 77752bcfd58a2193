//! Core plant types: the raw reading record and the usability rule shared by
//! every derived metric and aggregator.

use serde::{Deserialize, Serialize};

use super::calendar;

/// Returns the value only when it is present and finite.
///
/// This is the single "is this number usable?" check. Every derived metric and
/// every aggregator routes raw fields through it, so `NaN`, `±inf` and absent
/// values are all excluded the same way.
///
/// # Examples
///
/// ```
/// use hydronic_kpi::plant::types::usable;
///
/// assert_eq!(usable(Some(1.5)), Some(1.5));
/// assert_eq!(usable(Some(f64::NAN)), None);
/// assert_eq!(usable(None), None);
/// ```
pub fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// One timestamped sensor/billing sample from the plant.
///
/// Every field is optional: loaders leave unparseable or missing cells as
/// `None` and the pipeline excludes the reading only from the metrics that
/// need the missing field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Naive local timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: Option<String>,
    /// Supply-side pressure (kPa).
    pub pressure_in_kpa: Option<f64>,
    /// Return-side pressure (kPa).
    pub pressure_out_kpa: Option<f64>,
    /// Inlet water temperature (°C).
    pub temperature_in_c: Option<f64>,
    /// Outlet water temperature (°C).
    pub temperature_out_c: Option<f64>,
    /// Valve position (%). Carried through, not used by any KPI.
    pub valve_opening_percent: Option<f64>,
    /// Energy consumed during the sampling interval (kWh).
    pub energy_kwh: Option<f64>,
    /// Cost attributed to the sampling interval (USD).
    pub energy_cost_usd: Option<f64>,
}

impl Reading {
    /// Creates an empty reading stamped with `timestamp`.
    pub fn at(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            ..Self::default()
        }
    }

    /// Sets both water temperatures (°C).
    pub fn with_temperatures(mut self, inlet_c: f64, outlet_c: f64) -> Self {
        self.temperature_in_c = Some(inlet_c);
        self.temperature_out_c = Some(outlet_c);
        self
    }

    /// Sets both line pressures (kPa).
    pub fn with_pressures(mut self, inlet_kpa: f64, outlet_kpa: f64) -> Self {
        self.pressure_in_kpa = Some(inlet_kpa);
        self.pressure_out_kpa = Some(outlet_kpa);
        self
    }

    /// Sets energy use (kWh) and its cost (USD).
    pub fn with_energy(mut self, kwh: f64, cost_usd: f64) -> Self {
        self.energy_kwh = Some(kwh);
        self.energy_cost_usd = Some(cost_usd);
        self
    }

    /// Usable energy cost, if any.
    pub fn cost(&self) -> Option<f64> {
        usable(self.energy_cost_usd)
    }

    /// Date portion of the timestamp (`YYYY-MM-DD`), if present.
    pub fn day_key(&self) -> Option<&str> {
        self.timestamp.as_deref().and_then(calendar::day_key)
    }

    /// `YYYY-MM` month key of the timestamp, if present.
    pub fn month_key(&self) -> Option<&str> {
        self.timestamp.as_deref().and_then(calendar::month_key)
    }

    /// Hour of day (`0..=23`) of the timestamp, if present.
    pub fn hour(&self) -> Option<u8> {
        self.timestamp.as_deref().and_then(calendar::hour)
    }
}
