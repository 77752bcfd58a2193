//! Per-reading KPI derivation.

use serde::Serialize;

use super::types::{Reading, usable};

/// KPIs derived from a single [`Reading`].
///
/// Recomputed on demand, never stored. Each field is `None` when the inputs
/// it needs are unusable or the arithmetic would not be finite; one missing
/// field never blanks the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Outlet minus inlet temperature (°C).
    pub delta_t: Option<f64>,
    /// Inlet minus outlet pressure (kPa).
    pub pressure_drop: Option<f64>,
    /// Energy cost per degree of temperature change (USD/°C).
    pub cost_per_cooling_degree: Option<f64>,
    /// Temperature change per kWh consumed (°C/kWh).
    pub cooling_per_kwh: Option<f64>,
}

impl DerivedMetrics {
    /// Derives all KPIs for `reading`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hydronic_kpi::plant::metrics::DerivedMetrics;
    /// use hydronic_kpi::plant::types::Reading;
    ///
    /// let r = Reading::at("2025-01-01 00:00:00")
    ///     .with_temperatures(10.0, 5.0)
    ///     .with_energy(2.0, 1.0);
    /// let m = DerivedMetrics::compute(&r);
    /// assert_eq!(m.delta_t, Some(-5.0));
    /// assert_eq!(m.cooling_per_kwh, Some(-2.5));
    /// ```
    pub fn compute(reading: &Reading) -> Self {
        let delta_t = difference(reading.temperature_out_c, reading.temperature_in_c);
        let pressure_drop = difference(reading.pressure_in_kpa, reading.pressure_out_kpa);

        Self {
            delta_t,
            pressure_drop,
            cost_per_cooling_degree: ratio(usable(reading.energy_cost_usd), delta_t),
            cooling_per_kwh: ratio(delta_t, usable(reading.energy_kwh)),
        }
    }

    /// Returns both efficiency ratios when the reading belongs to the
    /// efficiency population, as `(cooling_per_kwh, cost_per_cooling_degree)`.
    pub fn efficiency_ratios(&self) -> Option<(f64, f64)> {
        Some((
            usable(self.cooling_per_kwh)?,
            usable(self.cost_per_cooling_degree)?,
        ))
    }
}

fn difference(lhs: Option<f64>, rhs: Option<f64>) -> Option<f64> {
    usable(Some(usable(lhs)? - usable(rhs)?))
}

fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let den = usable(denominator).filter(|d| *d != 0.0)?;
    usable(Some(usable(numerator)? / den))
}

/// A reading paired with the metrics derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedReading {
    /// Source reading, unchanged.
    #[serde(flatten)]
    pub reading: Reading,
    /// KPIs derived from `reading`.
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl EnrichedReading {
    /// Enriches a single reading.
    pub fn new(reading: Reading) -> Self {
        let metrics = DerivedMetrics::compute(&reading);
        Self { reading, metrics }
    }

    /// Recomputes the metrics from the embedded raw fields.
    ///
    /// Idempotent: as long as `reading` is unchanged the result equals `self`.
    pub fn enrich(self) -> Self {
        Self::new(self.reading)
    }
}

impl From<Reading> for EnrichedReading {
    fn from(reading: Reading) -> Self {
        Self::new(reading)
    }
}

/// Enriches every reading in order.
pub fn enrich_all(readings: &[Reading]) -> Vec<EnrichedReading> {
    readings.iter().cloned().map(EnrichedReading::new).collect()
}
