//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::adapters::chart_svg::ChartOptions;
use crate::adapters::console_summary::{format_summary, format_table_overview};
use crate::adapters::csv_adapter::CsvSignalAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_report_adapter::SvgReportAdapter;
use crate::domain::analysis::{self, Analysis};
use crate::domain::error::SigperfError;
use crate::domain::returns;
use crate::domain::signal_table::SignalTable;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::signal_source::SignalSource;

#[derive(Parser, Debug)]
#[command(name = "sigperf", about = "Performance analytics for trading signal series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute returns, Sharpe ratio and maximum drawdown
    Analyze {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the price/signal chart as SVG
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Also write a drawdown chart next to the price chart
        #[arg(long)]
        drawdown: bool,
        /// Input has a header row
        #[arg(long)]
        header: bool,
    },
    /// Load and check a price/signal file without computing statistics
    Validate {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        header: bool,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            input,
            config,
            chart,
            drawdown,
            header,
        } => run_analyze(&input, config.as_ref(), chart.as_ref(), drawdown, header),
        Command::Validate {
            input,
            config,
            header,
        } => run_validate(&input, config.as_ref(), header),
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, SigperfError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// A `--header` flag forces header handling on; otherwise `[input] has_header` decides.
pub fn build_source(
    input: &PathBuf,
    config: &dyn ConfigPort,
    header_flag: bool,
) -> Result<CsvSignalAdapter, SigperfError> {
    let adapter = CsvSignalAdapter::configured(input.clone(), config)?;
    Ok(if header_flag {
        adapter.with_header(true)
    } else {
        adapter
    })
}

/// `--chart` wins over `[chart] output`.
pub fn resolve_chart_path(flag: Option<&PathBuf>, config: &dyn ConfigPort) -> Option<PathBuf> {
    flag.cloned()
        .or_else(|| config.get_string("chart", "output").map(PathBuf::from))
}

/// Load, analyze, then report. A failed analysis writes nothing.
pub fn run_pipeline(
    source: &dyn SignalSource,
    report: Option<(&dyn ReportPort, &str)>,
) -> Result<(SignalTable, Analysis), SigperfError> {
    let table = source.load()?;
    info!(rows = table.len(), "signal table loaded");

    let analysis = analysis::analyze(&table)?;

    if let Some((port, path)) = report {
        port.write(&table, &analysis, path)?;
    }
    Ok((table, analysis))
}

fn run_analyze(
    input: &PathBuf,
    config_path: Option<&PathBuf>,
    chart_flag: Option<&PathBuf>,
    drawdown_flag: bool,
    header_flag: bool,
) -> ExitCode {
    match analyze_command(input, config_path, chart_flag, drawdown_flag, header_flag) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Runs `analyze` and returns the summary text that would be printed.
pub fn analyze_command(
    input: &PathBuf,
    config_path: Option<&PathBuf>,
    chart_flag: Option<&PathBuf>,
    drawdown_flag: bool,
    header_flag: bool,
) -> Result<String, SigperfError> {
    let config = load_config(config_path)?;
    let source = build_source(input, &config, header_flag)?;

    let chart_path = resolve_chart_path(chart_flag, &config);
    let reporter = SvgReportAdapter::new(ChartOptions::from_config(&config))
        .with_drawdown(drawdown_flag || config.get_bool("chart", "drawdown", false));
    let chart_str = chart_path.as_ref().map(|p| p.to_string_lossy().into_owned());
    let report = chart_str
        .as_deref()
        .map(|p| (&reporter as &dyn ReportPort, p));

    let (_, analysis) = run_pipeline(&source, report)?;
    Ok(format_summary(&analysis.summary))
}

fn run_validate(input: &PathBuf, config_path: Option<&PathBuf>, header_flag: bool) -> ExitCode {
    match validate_command(input, config_path, header_flag) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Loads the table and checks every return is defined.
pub fn validate_command(
    input: &PathBuf,
    config_path: Option<&PathBuf>,
    header_flag: bool,
) -> Result<String, SigperfError> {
    let config = load_config(config_path)?;
    let table = build_source(input, &config, header_flag)?.load()?;
    returns::build(&table.prices())?;
    info!(rows = table.len(), "input is valid");
    Ok(format_table_overview(&table))
}
