//! `meetsmart` CLI — compute a group's best meeting times from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Best times for an event and its responses (stdin → stdout)
//! cat request.json | meetsmart best-times
//!
//! # Human-readable output, from file to file
//! meetsmart best-times -i request.json -o best.txt --format text
//!
//! # Every common window, unscored
//! meetsmart windows -i request.json
//!
//! # Use a 15-minute grid instead of the default 10
//! MEETSMART_STEP_MINUTES=15 meetsmart best-times -i request.json
//! ```

mod config;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meetsmart_engine::request::{BestTimesResponse, WindowDto};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, OutputFormat};

#[derive(Parser)]
#[command(
    name = "meetsmart",
    version,
    about = "Find the best common meeting time for a group"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the highest-scoring common meeting times
    BestTimes {
        /// Input request JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (overrides the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// List every window where all respondents are free, unscored
    Windows {
        /// Input request JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (overrides the configured format)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config =
        Config::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Commands::BestTimes {
            input,
            output,
            format,
        } => {
            let json = read_input(input.as_deref())?;
            let response = meetsmart_engine::compute_best_times(&json, config.step_minutes)
                .context("Failed to compute best times")?;
            tracing::info!(
                best = response.best_times.len(),
                responses = response.response_count,
                "computed best times"
            );

            let rendered = match format.unwrap_or(config.format) {
                OutputFormat::Json => serde_json::to_string_pretty(&response)?,
                OutputFormat::Text => render_best_times(&response),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Windows {
            input,
            output,
            format,
        } => {
            let json = read_input(input.as_deref())?;
            let windows = meetsmart_engine::compute_common_windows(&json, config.step_minutes)
                .context("Failed to compute common windows")?;
            tracing::info!(windows = windows.len(), "computed common windows");

            let rendered = match format.unwrap_or(config.format) {
                OutputFormat::Json => serde_json::to_string_pretty(&windows)?,
                OutputFormat::Text => render_windows(&windows),
            };
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

fn render_best_times(response: &BestTimesResponse) -> String {
    let mut out = String::new();
    if response.best_times.is_empty() {
        out.push_str("No available times\n");
    }
    for best in &response.best_times {
        let (start, end) = best.time.split_once('~').unwrap_or((best.time.as_str(), ""));
        out.push_str(&format!("{} - {}  score: {}\n", start, end, best.score));
    }
    out.push_str(&format!(
        "Responses: {} ({:.0}% participation)\n",
        response.response_count, response.participation_rate
    ));
    out
}

fn render_windows(windows: &[WindowDto]) -> String {
    let mut out = String::new();
    if windows.is_empty() {
        out.push_str("No available times\n");
    }
    for w in windows {
        out.push_str(&format!("{} - {}  ({} min)\n", w.start, w.end, w.duration_minutes));
    }
    out
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetsmart_engine::request::BestTimeDto;

    #[test]
    fn best_times_render_one_line_each_then_summary() {
        let response = BestTimesResponse {
            best_times: vec![BestTimeDto {
                time: "2024-01-08T09:00:00~2024-01-08T09:30:00".to_string(),
                score: 3,
            }],
            response_count: 2,
            participation_rate: 50.0,
        };

        assert_eq!(
            render_best_times(&response),
            "2024-01-08T09:00:00 - 2024-01-08T09:30:00  score: 3\n\
             Responses: 2 (50% participation)\n"
        );
    }

    #[test]
    fn empty_windows_render_placeholder() {
        assert_eq!(render_windows(&[]), "No available times\n");

        let window = WindowDto {
            start: "2024-01-08T09:00:00".to_string(),
            end: "2024-01-08T09:30:00".to_string(),
            duration_minutes: 30,
        };
        assert_eq!(
            render_windows(&[window]),
            "2024-01-08T09:00:00 - 2024-01-08T09:30:00  (30 min)\n"
        );
    }
}
