//! hydronic-kpi entry point: CLI wiring, config resolution and output.

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hydronic_kpi::aggregate::filter::MonthFilter;
use hydronic_kpi::config::AnalysisConfig;
use hydronic_kpi::io::export::export_report;
use hydronic_kpi::io::load::load_readings;
use hydronic_kpi::plant::types::Reading;
use hydronic_kpi::report::PlantReport;
use hydronic_kpi::synth::SyntheticPlant;

#[derive(Parser)]
#[command(name = "hydronic-kpi")]
#[command(about = "KPI report for a hydronic chilled-water plant", long_about = None)]
struct Cli {
    /// Readings CSV to analyse
    #[arg(short, long, conflicts_with = "demo", required_unless_present = "demo")]
    input: Option<PathBuf>,

    /// Analyse a seeded synthetic plant instead of a CSV
    #[arg(long)]
    demo: bool,

    /// TOML analysis configuration
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in preset (default, strict, lenient)
    #[arg(short, long)]
    preset: Option<String>,

    /// Restrict daily and hourly series to one YYYY-MM month
    #[arg(long, conflicts_with = "calendar_month")]
    month: Option<String>,

    /// Restrict daily and hourly series to one month number across all years
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    calendar_month: Option<u8>,

    /// First day of the demo dataset
    #[arg(long, default_value = "2025-01-01")]
    start: chrono::NaiveDate,

    /// Days of demo data
    #[arg(long, default_value_t = 90)]
    days: usize,

    /// Seed for the demo generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Share of demo readings with missing fields (0 to 1)
    #[arg(long, default_value_t = 0.02)]
    gap_probability: f64,

    /// Write daily, hourly and monthly series as CSV into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Start the REST API after reporting
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter)
        .with_ansi(std::io::stderr().is_terminal() && env::var_os("NO_COLOR").is_none())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Resolves the configuration: `--config` first, then `--preset`, then the
/// default preset. Command-line month options replace `[filter]`.
fn resolve_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match (&cli.config, &cli.preset) {
        (Some(path), _) => AnalysisConfig::from_toml_file(path)?,
        (None, Some(name)) => AnalysisConfig::from_preset(name)?,
        (None, None) => AnalysisConfig::default(),
    };

    if cli.month.is_some() || cli.calendar_month.is_some() {
        config.filter.month = cli.month.clone();
        config.filter.calendar_month = cli.calendar_month;
    }

    let errors = config.validate();
    if let Some(first) = errors.first() {
        for e in &errors {
            tracing::error!("{e}");
        }
        bail!("invalid configuration ({} error(s)), first: {first}", errors.len());
    }
    Ok(config)
}

fn load(cli: &Cli, config: &AnalysisConfig) -> Result<Vec<Reading>> {
    match &cli.input {
        Some(path) => {
            let delimiter = config.input.delimiter.and_then(|c| u8::try_from(c).ok());
            load_readings(path, delimiter)
                .with_context(|| format!("failed to load readings from {}", path.display()))
        }
        None => {
            info!(days = cli.days, seed = cli.seed, "generating demo readings");
            Ok(SyntheticPlant::new(cli.start, cli.days, cli.seed)
                .with_gap_probability(cli.gap_probability)
                .readings())
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let filter: MonthFilter = config.month_filter()?;
    let readings = load(&cli, &config)?;

    let report = PlantReport::with_filter(&readings, &config, filter);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    if let Some(dir) = &cli.export_dir {
        let written = export_report(&report, dir)
            .with_context(|| format!("failed to export into {}", dir.display()))?;
        for path in written {
            eprintln!("wrote {}", path.display());
        }
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(hydronic_kpi::api::AppState::new(readings, config)?);
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(hydronic_kpi::api::serve(state, addr))
            .with_context(|| format!("API server on {addr} failed"))?;
    }

    Ok(())
}
