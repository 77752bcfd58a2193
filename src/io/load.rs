//! CSV loading of plant readings.
//!
//! Accepts comma or semicolon separated files with a header row naming the
//! reading fields. Also accepts the legacy export layout where every line is
//! a single quoted cell holding the whole comma-separated row.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::plant::types::Reading;

/// Errors raised while loading readings.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("cannot read \"{path}\": {source}")]
    Io {
        /// Offending path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The CSV layer rejected the input.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    /// The input has no header row.
    #[error("missing header row")]
    MissingHeader,
}

/// Column of the reading schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Timestamp,
    PressureIn,
    PressureOut,
    TemperatureIn,
    TemperatureOut,
    ValveOpening,
    Energy,
    Cost,
}

impl Column {
    fn from_header(name: &str) -> Option<Self> {
        match name {
            "timestamp" => Some(Self::Timestamp),
            "pressure_in_kPa" => Some(Self::PressureIn),
            "pressure_out_kPa" => Some(Self::PressureOut),
            "temperature_in_C" => Some(Self::TemperatureIn),
            "temperature_out_C" => Some(Self::TemperatureOut),
            "valve_opening_percent" => Some(Self::ValveOpening),
            "energy_kWh" => Some(Self::Energy),
            "energy_cost_USD" => Some(Self::Cost),
            _ => None,
        }
    }

    fn slot<'a>(&self, reading: &'a mut Reading) -> Option<&'a mut Option<f64>> {
        match self {
            Self::Timestamp => None,
            Self::PressureIn => Some(&mut reading.pressure_in_kpa),
            Self::PressureOut => Some(&mut reading.pressure_out_kpa),
            Self::TemperatureIn => Some(&mut reading.temperature_in_c),
            Self::TemperatureOut => Some(&mut reading.temperature_out_c),
            Self::ValveOpening => Some(&mut reading.valve_opening_percent),
            Self::Energy => Some(&mut reading.energy_kwh),
            Self::Cost => Some(&mut reading.energy_cost_usd),
        }
    }
}

/// Header names of the reading schema, in export order.
pub const READING_HEADER: [&str; 8] = [
    "timestamp",
    "pressure_in_kPa",
    "pressure_out_kPa",
    "temperature_in_C",
    "temperature_out_C",
    "valve_opening_percent",
    "energy_kWh",
    "energy_cost_USD",
];

/// Loads readings from a CSV file.
///
/// # Arguments
///
/// * `path` - CSV file to read
/// * `delimiter` - Field delimiter; detected from the header line when `None`
///
/// # Errors
///
/// Returns a `LoadError` if the file cannot be read, is not valid CSV, or has
/// no header row.
pub fn load_readings(path: &Path, delimiter: Option<u8>) -> Result<Vec<Reading>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let readings = read_readings(BufReader::new(file), delimiter).map_err(|e| match e {
        LoadError::Io { source, .. } => LoadError::Io {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })?;
    info!(path = %path.display(), count = readings.len(), "loaded readings");
    Ok(readings)
}

/// Reads readings from any CSV source.
///
/// Unknown columns are ignored. Numeric cells that do not parse to a finite
/// number are left empty. Blank records and records that are not valid UTF-8
/// are dropped; short records keep `None` for their missing trailing fields.
///
/// # Errors
///
/// Returns a `LoadError` if the source cannot be read, is not valid CSV, or
/// has no header row.
pub fn read_readings(
    mut source: impl Read,
    delimiter: Option<u8>,
) -> Result<Vec<Reading>, LoadError> {
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|source| LoadError::Io {
            path: "<reader>".to_string(),
            source,
        })?;

    let first_line = bytes
        .split(|&b| b == b'\n')
        .find(|l| l.iter().any(|b| !b.is_ascii_whitespace()))
        .ok_or(LoadError::MissingHeader)?;
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(first_line));

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());

    let mut records = rdr.byte_records();
    let header = loop {
        match records.next() {
            Some(record) => {
                let record = csv::StringRecord::from_byte_record_lossy(record?);
                let fields = unwrap_quoted_row(&record, delimiter);
                if fields.iter().any(|f| !f.is_empty()) {
                    break fields;
                }
            }
            None => return Err(LoadError::MissingHeader),
        }
    };
    let columns: Vec<Option<Column>> = header.iter().map(|h| Column::from_header(h)).collect();
    if columns.iter().all(Option::is_none) {
        debug!(?header, "header names no known reading column");
    }

    let mut readings = Vec::new();
    let mut blank = 0_usize;
    let mut undecodable = 0_usize;
    for record in records {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let record = match csv::StringRecord::from_byte_record(record) {
            Ok(record) => record,
            Err(e) => {
                debug!(line, error = %e.utf8_error(), "dropped non-UTF-8 record");
                undecodable += 1;
                continue;
            }
        };
        let fields = unwrap_quoted_row(&record, delimiter);
        if fields.iter().all(|f| f.is_empty()) {
            blank += 1;
            continue;
        }
        readings.push(parse_row(&columns, &fields, line));
    }

    if blank > 0 || undecodable > 0 {
        debug!(blank, undecodable, "skipped records");
    }
    Ok(readings)
}

/// Picks `;` when the header uses semicolons and no commas, `,` otherwise.
fn detect_delimiter(header_line: &[u8]) -> u8 {
    if header_line.contains(&b';') && !header_line.contains(&b',') {
        b';'
    } else {
        b','
    }
}

/// Splits a record that arrived as one quoted cell holding the whole row.
fn unwrap_quoted_row(record: &csv::StringRecord, delimiter: u8) -> Vec<String> {
    let sep = char::from(delimiter);
    if record.len() == 1 && record[0].contains(sep) {
        record[0].split(sep).map(|f| f.trim().to_string()).collect()
    } else {
        record.iter().map(str::to_string).collect()
    }
}

fn parse_row(columns: &[Option<Column>], fields: &[String], line: u64) -> Reading {
    let mut reading = Reading::default();
    for (column, raw) in columns.iter().zip(fields) {
        let Some(column) = column else { continue };
        if raw.is_empty() {
            continue;
        }
        match column.slot(&mut reading) {
            None => reading.timestamp = Some(raw.clone()),
            Some(slot) => {
                *slot = raw.parse::<f64>().ok().filter(|v| v.is_finite());
                if slot.is_none() {
                    debug!(line, ?column, raw = %raw, "non-numeric value left empty");
                }
            }
        }
    }
    reading
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "timestamp,pressure_in_kPa,pressure_out_kPa,temperature_in_C,\
                          temperature_out_C,valve_opening_percent,energy_kWh,energy_cost_USD";

    #[test]
    fn parses_plain_comma_rows() {
        let csv = format!("{HEADER}\n2025-01-01 00:00:00,397.7,380.2,12.0,7.5,55,2.0,0.09\n");
        let readings = read_readings(csv.as_bytes(), None).unwrap();
        assert_eq!(readings.len(), 1);
        let r = &readings[0];
        assert_eq!(r.timestamp.as_deref(), Some("2025-01-01 00:00:00"));
        assert_eq!(r.pressure_in_kpa, Some(397.7));
        assert_eq!(r.temperature_out_c, Some(7.5));
        assert_eq!(r.valve_opening_percent, Some(55.0));
        assert_eq!(r.energy_cost_usd, Some(0.09));
    }

    #[test]
    fn parses_whole_line_quoted_rows() {
        let csv = format!(
            "\"{HEADER}\"\n\"2025-01-01 01:00:00,397.7,380.2,12.0,7.5,55,2.0,0.09\"\n"
        );
        let readings = read_readings(csv.as_bytes(), None).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].energy_kwh, Some(2.0));
        assert_eq!(readings[0].hour(), Some(1));
    }

    #[test]
    fn detects_semicolon_delimiter() {
        let csv = "timestamp;energy_kWh;energy_cost_USD\n2025-01-01 00:00:00;1.5;0.2\n";
        let readings = read_readings(csv.as_bytes(), None).unwrap();
        assert_eq!(readings[0].energy_kwh, Some(1.5));
        assert_eq!(readings[0].energy_cost_usd, Some(0.2));
    }

    #[test]
    fn non_numeric_and_missing_fields_are_none() {
        let csv = format!("{HEADER}\n2025-01-01 00:00:00,n/a,380.2,NaN,7.5\n");
        let readings = read_readings(csv.as_bytes(), None).unwrap();
        let r = &readings[0];
        assert_eq!(r.pressure_in_kpa, None);
        assert_eq!(r.pressure_out_kpa, Some(380.2));
        assert_eq!(r.temperature_in_c, None);
        assert_eq!(r.energy_kwh, None);
        assert_eq!(r.energy_cost_usd, None);
    }

    #[test]
    fn blank_rows_dropped_unknown_columns_ignored() {
        let csv = "timestamp,site,energy_cost_USD\n\n2025-01-01 00:00:00,north,0.5\n,,\n";
        let readings = read_readings(csv.as_bytes(), None).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].energy_cost_usd, Some(0.5));
    }

    #[test]
    fn non_utf8_rows_are_dropped() {
        let mut csv = format!("{HEADER}\n2025-01-01 00:00:00,400,380,5,10,40,2,0.1\n").into_bytes();
        csv.extend_from_slice(b"2025-01-01 01:00:00,4\xff0,380,5,10,40,2,0.1\n");
        csv.extend_from_slice(b"2025-01-01 02:00:00,400,380,5,10,40,2,0.3\n");

        let readings = read_readings(csv.as_slice(), None).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].hour(), Some(0));
        assert_eq!(readings[1].hour(), Some(2));
        assert_eq!(readings[1].energy_cost_usd, Some(0.3));
    }

    #[test]
    fn empty_source_has_no_header() {
        let err = read_readings("".as_bytes(), None).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_readings(Path::new("/nonexistent/plant.csv"), None).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
