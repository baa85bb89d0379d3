use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser};
use pokergrid::check::run_checks;
use pokergrid::config::HarnessConfig;
use pokergrid::hash::hash_report;
use pokergrid::report::{self, CheckReport, HashReport, ReportFormat};
use pokergrid_contracts::ENTRY_PATH;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "POKERGRID_LOG";

#[derive(Parser, Debug)]
#[command(name = "pokergrid")]
#[command(about = "Conformance checks for the poker chart repository.", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter (trace, debug, info, warn, error); falls back to $POKERGRID_LOG, then warn.
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Run the full conformance suite.
    Check(CheckArgs),
    /// Print canonical dataset digests next to their lock values.
    Hash(HashArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Repository root directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    repo_root: PathBuf,

    /// Entry module, relative to the repository root.
    #[arg(long, value_name = "PATH", default_value = ENTRY_PATH)]
    entry: String,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Write the report to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct HashArgs {
    /// Repository root directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    repo_root: PathBuf,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Command::Check(args) => cmd_check(args),
        Command::Hash(args) => cmd_hash(args),
    }
}

fn init_tracing(log_level: Option<&str>) {
    let directive = log_level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| "warn".to_string());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn repo_root_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        anyhow::bail!("repo root is not a directory: {}", path.display());
    }
    Ok(path.to_path_buf())
}

fn cmd_check(args: CheckArgs) -> Result<ExitCode> {
    let repo_root = repo_root_dir(&args.repo_root)?;
    let cfg = HarnessConfig::new(&repo_root)?.with_entry(&args.entry);
    let outcome = run_checks(&cfg);
    let bytes = report::render(args.format, &outcome, CheckReport::render_text)?;
    report::emit(args.out.as_deref(), &bytes)?;
    Ok(ExitCode::from(outcome.exit_code()))
}

fn cmd_hash(args: HashArgs) -> Result<ExitCode> {
    let repo_root = repo_root_dir(&args.repo_root)?;
    let cfg = HarnessConfig::new(&repo_root)?;
    let digests = hash_report(&cfg)?;
    let bytes = report::render(args.format, &digests, HashReport::render_text)?;
    report::emit(None, &bytes)?;
    Ok(ExitCode::SUCCESS)
}
