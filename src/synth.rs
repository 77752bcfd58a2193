//! Seeded synthetic plant readings for demos and tests.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::plant::types::Reading;

/// Timestamp layout shared with the CSV input.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Hours of the day billed at the peak tariff, `[start, end)`.
const PEAK_HOURS: std::ops::Range<u32> = 8..20;

/// A chilled-water plant generating one reading per hour.
///
/// Load follows a daily sinusoid peaking mid-afternoon. Energy use rises with
/// load while the achieved temperature lift drops slightly, so off-peak night
/// hours tend to classify as efficient and afternoon hours as inefficient.
/// Costs use a two-rate tariff.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hydronic_kpi::synth::SyntheticPlant;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let readings = SyntheticPlant::new(start, 2, 42).readings();
/// assert_eq!(readings.len(), 48);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticPlant {
    /// First simulated day, starting at midnight.
    pub start: NaiveDate,
    /// Number of simulated days.
    pub days: usize,
    /// Standard deviation of the energy noise (kWh).
    pub noise_std: f64,
    /// Chance that a reading loses its energy or temperature fields.
    pub gap_probability: f64,
    /// Off-peak tariff (USD/kWh).
    pub off_peak_price: f64,
    /// Peak tariff (USD/kWh).
    pub peak_price: f64,
    rng: StdRng,
}

impl SyntheticPlant {
    /// Creates a plant with default tariff and noise and no gaps.
    ///
    /// # Arguments
    ///
    /// * `start` - First simulated day
    /// * `days` - Number of days to generate
    /// * `seed` - Random seed for reproducible output
    pub fn new(start: NaiveDate, days: usize, seed: u64) -> Self {
        Self {
            start,
            days,
            noise_std: 0.8,
            gap_probability: 0.0,
            off_peak_price: 0.04,
            peak_price: 0.06,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sets the gap probability, clamped to `[0, 1]`.
    pub fn with_gap_probability(mut self, probability: f64) -> Self {
        self.gap_probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Sets the energy noise standard deviation; negative values disable noise.
    pub fn with_noise(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std.max(0.0);
        self
    }

    /// Generates `days * 24` hourly readings in chronological order.
    pub fn readings(&mut self) -> Vec<Reading> {
        let origin = self.start.and_time(NaiveTime::MIN);
        (0..self.days * 24)
            .map(|h| self.reading_at(origin + Duration::hours(h as i64)))
            .collect()
    }

    fn gaussian(&mut self, std: f64) -> f64 {
        if std <= 0.0 {
            return 0.0;
        }
        // Box-Muller
        let u1: f64 = self.rng.random::<f64>().clamp(1e-9, 1.0);
        let u2: f64 = self.rng.random::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos() * std
    }

    fn reading_at(&mut self, at: NaiveDateTime) -> Reading {
        let hour = at.hour();
        // 0 at 03:00, 1 at 15:00
        let angle = 2.0 * std::f64::consts::PI * (f64::from(hour) - 9.0) / 24.0;
        let load = 0.5 + 0.5 * angle.sin();

        let energy_kwh = (6.0 + 8.0 * load + self.gaussian(self.noise_std)).max(0.5);
        let temperature_in_c = 7.0 + self.gaussian(0.2);
        let lift = (5.0 - 1.0 * load + self.gaussian(0.3)).max(0.5);
        let pressure_in_kpa = 400.0 + self.gaussian(3.0);
        let pressure_drop = 15.0 + 10.0 * load;
        let price = if PEAK_HOURS.contains(&hour) {
            self.peak_price
        } else {
            self.off_peak_price
        };

        let mut reading = Reading::at(at.format(TIMESTAMP_FORMAT).to_string())
            .with_temperatures(round(temperature_in_c, 2), round(temperature_in_c + lift, 2))
            .with_pressures(round(pressure_in_kpa, 1), round(pressure_in_kpa - pressure_drop, 1))
            .with_energy(round(energy_kwh, 3), round(energy_kwh * price, 4));
        reading.valve_opening_percent = Some(round((30.0 + 60.0 * load).clamp(0.0, 100.0), 1));

        if self.gap_probability > 0.0 && self.rng.random_bool(self.gap_probability) {
            if self.rng.random_bool(0.5) {
                reading.energy_kwh = None;
                reading.energy_cost_usd = None;
            } else {
                reading.temperature_out_c = None;
            }
        }
        reading
    }
}

fn round(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

/// Demo dataset: `days` of readings from 2025-01-01 with 2 % gaps.
pub fn demo_readings(days: usize, seed: u64) -> Vec<Reading> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default();
    SyntheticPlant::new(start, days, seed)
        .with_gap_probability(0.02)
        .readings()
}
