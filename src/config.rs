//! TOML-based analysis configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::aggregate::filter::{MonthFilter, MonthFilterError};
use crate::aggregate::savings::{DEFAULT_FLAT_REDUCTIONS, DEFAULT_TARGET_OFFSETS};
use crate::plant::calendar;
use crate::plant::efficiency::{
    DEFAULT_COOLING_PER_KWH_THRESHOLD, DEFAULT_COST_PER_COOLING_DEGREE_THRESHOLD,
    EfficiencyThresholds,
};

/// Top-level analysis configuration parsed from TOML.
///
/// All fields have defaults matching the `default` preset. Load from TOML
/// with [`AnalysisConfig::from_toml_file`] or start from
/// [`AnalysisConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Efficiency classification thresholds.
    #[serde(default)]
    pub efficiency: EfficiencyConfig,
    /// Month restriction for the daily and hourly series.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Savings projection parameters.
    #[serde(default)]
    pub savings: SavingsConfig,
    /// CSV input options.
    #[serde(default)]
    pub input: InputConfig,
}

/// Efficiency classification thresholds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EfficiencyConfig {
    /// Strict lower bound on °C per kWh.
    pub cooling_per_kwh_threshold: f64,
    /// Strict upper bound on USD per °C.
    pub cost_per_cooling_degree_threshold: f64,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            cooling_per_kwh_threshold: DEFAULT_COOLING_PER_KWH_THRESHOLD,
            cost_per_cooling_degree_threshold: DEFAULT_COST_PER_COOLING_DEGREE_THRESHOLD,
        }
    }
}

/// Month restriction. At most one of the two fields may be set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Exact `YYYY-MM` month.
    pub month: Option<String>,
    /// Month number `1..=12`, pooled across years.
    pub calendar_month: Option<u8>,
}

/// Savings projection parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SavingsConfig {
    /// Percentage-point increases of the efficient-hour share.
    pub target_offsets: Vec<f64>,
    /// Flat percentage reductions of monthly spend.
    pub flat_reductions: Vec<f64>,
}

impl Default for SavingsConfig {
    fn default() -> Self {
        Self {
            target_offsets: DEFAULT_TARGET_OFFSETS.to_vec(),
            flat_reductions: DEFAULT_FLAT_REDUCTIONS.to_vec(),
        }
    }
}

/// CSV input options.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Field delimiter; auto-detected from the header when absent.
    pub delimiter: Option<char>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"efficiency.cooling_per_kwh_threshold"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl AnalysisConfig {
    /// Tighter thresholds: the plant must move more heat for less money.
    pub fn strict() -> Self {
        Self {
            efficiency: EfficiencyConfig {
                cooling_per_kwh_threshold: 0.8,
                cost_per_cooling_degree_threshold: 0.05,
            },
            ..Self::default()
        }
    }

    /// Looser thresholds for older or undersized plants.
    pub fn lenient() -> Self {
        Self {
            efficiency: EfficiencyConfig {
                cooling_per_kwh_threshold: 0.3,
                cost_per_cooling_degree_threshold: 0.10,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "strict", "lenient"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default()),
            "strict" => Ok(Self::strict()),
            "lenient" => Ok(Self::lenient()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Efficiency thresholds in the form the classifier takes.
    pub fn thresholds(&self) -> EfficiencyThresholds {
        EfficiencyThresholds {
            cooling_per_kwh: self.efficiency.cooling_per_kwh_threshold,
            cost_per_cooling_degree: self.efficiency.cost_per_cooling_degree_threshold,
        }
    }

    /// Resolves the `[filter]` section into a month filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is malformed or both fields are set.
    pub fn month_filter(&self) -> Result<MonthFilter, MonthFilterError> {
        MonthFilter::from_options(self.filter.month.as_deref(), self.filter.calendar_month)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let eff = &self.efficiency;
        if !eff.cooling_per_kwh_threshold.is_finite() {
            errors.push(ConfigError::new(
                "efficiency.cooling_per_kwh_threshold",
                "must be finite",
            ));
        }
        if !(eff.cost_per_cooling_degree_threshold.is_finite()
            && eff.cost_per_cooling_degree_threshold > 0.0)
        {
            errors.push(ConfigError::new(
                "efficiency.cost_per_cooling_degree_threshold",
                "must be finite and > 0",
            ));
        }

        let f = &self.filter;
        if f.month.is_some() && f.calendar_month.is_some() {
            errors.push(ConfigError::new(
                "filter.month",
                "cannot be combined with filter.calendar_month",
            ));
        }
        if let Some(month) = &f.month {
            if !calendar::is_month_key(month) {
                errors.push(ConfigError::new(
                    "filter.month",
                    format!("must be YYYY-MM, got \"{month}\""),
                ));
            }
        }
        if let Some(month) = f.calendar_month {
            if !(1..=12).contains(&month) {
                errors.push(ConfigError::new(
                    "filter.calendar_month",
                    format!("must be in 1..=12, got {month}"),
                ));
            }
        }

        let s = &self.savings;
        if s.target_offsets.iter().any(|o| !(o.is_finite() && *o > 0.0)) {
            errors.push(ConfigError::new(
                "savings.target_offsets",
                "every offset must be finite and > 0",
            ));
        }
        if s
            .flat_reductions
            .iter()
            .any(|r| !(r.is_finite() && *r > 0.0 && *r <= 100.0))
        {
            errors.push(ConfigError::new(
                "savings.flat_reductions",
                "every reduction must be in (0, 100]",
            ));
        }

        if let Some(d) = self.input.delimiter {
            if !d.is_ascii() {
                errors.push(ConfigError::new(
                    "input.delimiter",
                    format!("must be a single ASCII character, got '{d}'"),
                ));
            }
        }

        errors
    }
}
