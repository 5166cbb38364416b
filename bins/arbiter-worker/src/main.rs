mod config;
mod engine;
mod evaluator;
mod executor;
mod problem;
mod solution;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use arbiter_common::report::write_report;
use arbiter_common::Comparison;
use clap::Parser;
use config::JudgeConfig;
use solution::TwoSum;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "arbiter-worker")]
#[command(about = "Arbiter Worker - Judge one compiled submission against a battery of test cases", long_about = None)]
struct Cli {
    /// Read the battery from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON judge configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-case deadline in milliseconds
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Output comparison (exact, unordered)
    #[arg(long)]
    comparison: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_json);
    install_panic_hook();

    let config = load_config(&cli)?;
    let run_id = Uuid::new_v4();

    info!(
        run_id = %run_id,
        timeout_ms = config.timeout_ms,
        comparison = %config.comparison,
        "Arbiter Worker booting..."
    );

    let text = read_battery(cli.input.as_deref())?;

    let problem = Arc::new(TwoSum::default());
    let span = info_span!("battery", run_id = %run_id);

    let report = match executor::judge_input(&text, problem, &config)
        .instrument(span)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            let message = format!("{:#}", e);
            error!(run_id = %run_id, error = %message, "Battery rejected");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &report).context("Failed to write report")?;

    info!(run_id = %run_id, verdict = %report.verdict, "Worker shutdown complete");
    Ok(())
}

/// Logs go to stderr; stdout carries only the report
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(true)
        .with_line_number(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Route panics (mostly from candidate threads) through tracing
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        error!(
            thread = thread.name().unwrap_or("unnamed"),
            panic = %info,
            "Thread panicked"
        );
    }));
}

fn load_config(cli: &Cli) -> Result<JudgeConfig> {
    let base = match &cli.config {
        Some(path) => JudgeConfig::load(path)?,
        None => JudgeConfig::default(),
    };

    let comparison = match cli.comparison.as_deref() {
        Some(name) => Some(
            Comparison::from_name(name)
                .with_context(|| format!("Unknown comparison '{}' (expected exact or unordered)", name))?,
        ),
        None => None,
    };

    let config = base
        .apply_env()?
        .with_overrides(cli.timeout_ms, comparison);
    config.validate()?;

    Ok(config)
}

fn read_battery(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read battery from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read battery from stdin")?;
            Ok(text)
        }
    }
}
