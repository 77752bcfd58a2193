//! Loading readings from CSV files and exporting series back out.

mod common;

use std::fs;
use std::path::PathBuf;

use common::CSV_HEADER;
use hydronic_kpi::config::AnalysisConfig;
use hydronic_kpi::io::export::export_report;
use hydronic_kpi::io::load::{LoadError, load_readings};
use hydronic_kpi::report::PlantReport;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hydronic-kpi-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_file_and_builds_report() {
    let dir = scratch_dir("load");
    let path = dir.join("plant.csv");
    fs::write(
        &path,
        format!(
            "{CSV_HEADER}\n\
             2025-01-01 08:00:00,400,380,5,10,40,2,0.1\n\
             2025-01-01 09:00:00,400,378,5,10,60,20,1.0\n\
             \n\
             2025-02-01 08:00:00,401,381,5,10,40,2,0.2\n"
        ),
    )
    .unwrap();

    let readings = load_readings(&path, None).unwrap();
    assert_eq!(readings.len(), 3);
    assert_eq!(readings[1].pressure_out_kpa, Some(378.0));

    let report = PlantReport::build(&readings, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.efficiency.total_hours, 3);
    assert_eq!(report.efficiency.efficient_hours, 2);
    assert!(common::approx_eq(report.daily[0].total_cost.unwrap(), 1.1));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn loads_quoted_line_export() {
    let dir = scratch_dir("quoted");
    let path = dir.join("legacy.csv");
    fs::write(
        &path,
        format!("\"{CSV_HEADER}\"\n\"2025-03-04 17:00:00,400,380,5,10,40,2,0.1\"\n"),
    )
    .unwrap();

    let readings = load_readings(&path, None).unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].hour(), Some(17));
    assert_eq!(readings[0].energy_cost_usd, Some(0.1));
    fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_reports_path() {
    let err = load_readings(std::path::Path::new("/definitely/not/here.csv"), None).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.csv"));
}

#[test]
fn export_writes_every_series() {
    let dir = scratch_dir("export");
    let readings = hydronic_kpi::synth::demo_readings(3, 9);
    let report = PlantReport::build(&readings, &AnalysisConfig::default()).unwrap();

    let written = export_report(&report, &dir.join("out")).unwrap();
    let names: Vec<String> = written
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "daily.csv",
            "hourly.csv",
            "monthly_total_cost.csv",
            "monthly_average_cost.csv",
            "monthly_average_cost_per_cooling_degree.csv",
        ]
    );

    let daily = fs::read_to_string(&written[0]).unwrap();
    assert_eq!(daily.lines().count(), 1 + 3);
    let hourly = fs::read_to_string(&written[1]).unwrap();
    assert!(hourly.starts_with("hour,total,inefficient"));
    fs::remove_dir_all(&dir).ok();
}
