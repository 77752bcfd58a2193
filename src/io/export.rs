//! CSV export of the aggregated series.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::aggregate::daily::DailyEntry;
use crate::aggregate::hourly::HourEntry;
use crate::aggregate::monthly::{MonthlyEntry, MonthlyMetric};
use crate::report::PlantReport;

const DAILY_HEADER: [&str; 4] = [
    "day",
    "reading_count",
    "total_cost_usd",
    "avg_cost_per_cooling_degree",
];
const MONTHLY_HEADER: [&str; 5] = ["month", "index", "value", "delta", "trend"];
const HOURLY_HEADER: [&str; 5] = [
    "hour",
    "total",
    "inefficient",
    "inefficient_percent",
    "efficient_percent",
];

/// Errors raised while exporting series.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Creating the output file or directory failed.
    #[error("cannot write \"{path}\": {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The CSV writer failed.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}

fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(String::new, |v| format!("{v:.precision$}"))
}

/// Writes the daily series as CSV to any writer.
///
/// Absent values are written as empty cells.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_daily_csv(entries: &[DailyEntry], writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(DAILY_HEADER)?;
    for e in entries {
        wtr.write_record(&[
            e.day.clone(),
            e.reading_count.to_string(),
            opt(e.total_cost, 4),
            opt(e.avg_cost_per_cooling_degree, 6),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes one monthly series as CSV to any writer.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_monthly_csv(entries: &[MonthlyEntry], writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(MONTHLY_HEADER)?;
    for e in entries {
        let trend = e.trend.map_or("", |t| t.as_str());
        wtr.write_record(&[
            e.month.clone(),
            e.index.to_string(),
            format!("{:.6}", e.value),
            opt(e.delta, 6),
            trend.to_string(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the hour-of-day profile as CSV to any writer.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_hourly_csv(entries: &[HourEntry], writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HOURLY_HEADER)?;
    for e in entries {
        wtr.write_record(&[
            e.hour.to_string(),
            e.total.to_string(),
            e.inefficient.to_string(),
            format!("{:.2}", e.inefficient_percent),
            format!("{:.2}", e.efficient_percent()),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn create(path: &Path) -> Result<io::BufWriter<File>, ExportError> {
    File::create(path)
        .map(io::BufWriter::new)
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Exports every series of `report` into `dir`, creating it if needed.
///
/// Files written: `daily.csv`, `hourly.csv` and one
/// `monthly_<metric>.csv` per monthly metric.
///
/// # Returns
///
/// The paths written, in write order.
///
/// # Errors
///
/// Returns an `ExportError` if the directory or any file cannot be written.
pub fn export_report(report: &PlantReport, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();

    let path = dir.join("daily.csv");
    write_daily_csv(&report.daily, create(&path)?)?;
    written.push(path);

    let path = dir.join("hourly.csv");
    write_hourly_csv(&report.hourly, create(&path)?)?;
    written.push(path);

    for metric in MonthlyMetric::ALL {
        let path = dir.join(format!("monthly_{metric}.csv"));
        write_monthly_csv(report.monthly_series(metric), create(&path)?)?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "exported series");
    Ok(written)
}
