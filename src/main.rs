//! sql2drawio - convert a SQL schema dump into a draw.io ER diagram

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sql2drawio::error::ConvertError;
use sql2drawio::ids::RandomIds;
use sql2drawio::logging::init_logging;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::{Level, info, warn};

#[derive(Parser)]
#[command(name = "sql2drawio")]
#[command(about = "Convert a SQL schema dump into a draw.io ER diagram")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// SQL file containing CREATE TABLE / ALTER TABLE / CREATE UNIQUE INDEX statements
    #[arg(short, long = "input-path", visible_alias = "input_path")]
    input_path: PathBuf,

    /// Destination .drawio file
    #[arg(short, long = "output-path", visible_alias = "output_path")]
    output_path: PathBuf,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long)]
    log_format: Option<String>,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = fs::read_to_string(&cli.input_path).map_err(|source| ConvertError::Read {
        path: cli.input_path.clone(),
        source,
    })?;

    let conversion = sql2drawio::convert(&input, &mut RandomIds).context("Failed to render diagram")?;

    if conversion.schema.is_empty() {
        warn!(input = %cli.input_path.display(), "No tables found");
        // Filtered out or no subscriber installed
        if !tracing::enabled!(Level::WARN) {
            eprintln!("Warning: No tables found in {}", cli.input_path.display());
        }
        return Ok(());
    }
    info!(
        tables = conversion.schema.len(),
        relationships = conversion.layout.edges.len(),
        "Found tables, generating diagram"
    );

    fs::write(&cli.output_path, &conversion.document).map_err(|source| ConvertError::Write {
        path: cli.output_path.clone(),
        source,
    })?;
    info!(output = %cli.output_path.display(), "Successfully generated diagram");

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level.map(|l| l.as_str()), cli.log_format.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
