//! CLI entry point for the transcript GPA calculator.
//!
//! Reads a transcript dump from a file or stdin and reports per-category
//! credit counts and grade point averages as a logged table, JSON, or CSV.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use transcript_gpa::{
    output::{append_rows, print_pretty, print_summary, write_json},
    parser::parse_transcript,
    report::TranscriptReport,
};

#[derive(Parser)]
#[command(name = "transcript_gpa")]
#[command(about = "Computes credit totals and GPA from a transcript dump", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a per-category summary table
    Summary {
        /// Transcript file, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        source: String,
    },
    /// Print the full report as JSON on stdout
    Json {
        /// Transcript file, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        source: String,
    },
    /// Append one CSV row per category and subcategory
    Export {
        /// Transcript file, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        source: String,

        /// CSV file to append results to
        #[arg(short, long, default_value = "transcript.csv")]
        output: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let _log_guard = init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Summary { source } => {
            let report = load_report(&source)?;
            print_pretty(&report);
            print_summary(&report);
        }
        Commands::Json { source } => {
            let report = load_report(&source)?;
            write_json(std::io::stdout().lock(), &report)?;
        }
        Commands::Export { source, output } => {
            let report = load_report(&source)?;
            append_rows(&output, &report)?;
            info!(output = %output, categories = report.categories.len(), "Report exported");
        }
    }

    Ok(())
}

/// Installs a colored stderr layer (`RUST_LOG`, default `info`) and a JSON
/// layer on a daily-rolling file at `LOG_FILE_PATH` (`RUST_LOG_JSON`, default
/// `debug`). The returned guard flushes the file writer when dropped.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/transcript_gpa.log".to_string());
    let log_path = Path::new(&log_file_path);
    let log_dir = log_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_path
        .file_name()
        .unwrap_or(OsStr::new("transcript_gpa.log"));

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, log_file_name));

    let console = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_file = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(console)
        .with(json_file)
        .init();

    Ok(guard)
}

/// Reads the transcript and builds its report.
fn load_report(source: &str) -> Result<TranscriptReport> {
    let raw = read_source(source)?;
    let transcript = parse_transcript(&raw);
    Ok(TranscriptReport::from_transcript(&transcript))
}

/// Reads a transcript from a file path, or from stdin when `source` is `-`.
#[tracing::instrument]
fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read transcript from stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read transcript from {}", source))
    }
}
