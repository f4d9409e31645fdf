//! TRIAGE — patient cohort assessment CLI
//!
//! Fetches every page of patient records from the assessment API, scores each
//! patient, sorts them into the high-risk, fever, and data-quality cohorts,
//! and submits the result.
//!
//! Usage:
//!   triage run
//!   triage --config triage.toml run
//!   triage run --dry-run --page-size 20
//!   triage --env-file staging.env check-config
//!
//! `BASE_API_URL` and `API_KEY` are read from `.env` (or `--env-file`) and the
//! process environment, which wins; both override the config file.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use triage_contracts::{assessment::RunReport, error::TriageResult};
use triage_core::{Pipeline, RunMode};
use triage_http::{HttpTransport, TriageConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// TRIAGE — vital-sign risk scoring and cohort submission.
#[derive(Parser)]
#[command(
    name = "triage",
    about = "Score patients from the assessment API and submit risk cohorts",
    long_about = "Fetches all patient pages (with retry), computes a 0-7 risk score from\n\
                  blood pressure, temperature, and age, and submits the high-risk, fever,\n\
                  and data-quality cohorts."
)]
struct Cli {
    /// Path to a TOML config file. Environment variables override its values.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Dotenv file with BASE_API_URL / API_KEY. Defaults to ./.env when present.
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, score, categorize, and submit.
    Run(RunArgs),
    /// Load and validate the configuration, then print it with the key redacted.
    CheckConfig,
}

#[derive(Args)]
struct RunArgs {
    /// Fetch, score, and categorize without submitting.
    #[arg(long)]
    dry_run: bool,

    /// Records per page, overriding the config file.
    #[arg(long)]
    page_size: Option<u32>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for per-page and per-attempt output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let sources = ConfigSources {
        config: cli.config,
        env_file: cli.env_file,
    };
    let result = match cli.command {
        Command::Run(args) => run(&sources, args).await,
        Command::CheckConfig => check_config(&sources),
    };

    if let Err(e) = result {
        error!(error = %e, "run failed");
        eprintln!("triage error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

struct ConfigSources {
    config: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

fn load_config(sources: &ConfigSources, args: Option<&RunArgs>) -> TriageResult<TriageConfig> {
    let mut config = TriageConfig::load(sources.config.as_deref(), sources.env_file.as_deref())?;
    if let Some(page_size) = args.and_then(|a| a.page_size) {
        config.page_size = page_size;
        config.validate()?;
    }
    Ok(config)
}

async fn run(sources: &ConfigSources, args: RunArgs) -> TriageResult<()> {
    let config = load_config(sources, Some(&args))?;
    let mode = if args.dry_run { RunMode::DryRun } else { RunMode::Submit };
    let transport = Arc::new(HttpTransport::new(&config)?);
    let pipeline = Pipeline::new(transport, config.retry_policy(), config.collector_options());

    let report = pipeline.run(mode).await?;
    print_report(&report);
    Ok(())
}

fn check_config(sources: &ConfigSources) -> TriageResult<()> {
    let config = load_config(sources, None)?;
    println!("{:#?}", config);
    println!("Configuration OK.");
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_report(report: &RunReport) {
    let assessment = &report.assessment;

    println!();
    println!("Run {}", report.run_id);
    println!(
        "Collected {} of {} patients ({} per page)",
        report.fetched.count, report.fetched.total_records, report.fetched.per_page
    );
    println!();
    println!("  high risk     {:>4}", assessment.high_risk_patients.len());
    println!("  fever         {:>4}", assessment.fever_patients.len());
    println!("  data quality  {:>4}", assessment.data_quality_issues.len());
    println!();
    println!("Categorized patients:");
    println!("{}", to_pretty(assessment));

    match &report.acknowledgment {
        Some(ack) => {
            println!();
            println!("Submission response:");
            println!("{}", to_pretty(ack));
        }
        None => {
            println!();
            println!("Dry run; nothing was submitted.");
        }
    }
}

fn to_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unprintable: {}>", e))
}
