use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use reledger_ingest::discover;
use reledger_ledger::{BatchReport, FileStatus, PipelineOptions, convert_batch, run_batch};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

mod config;
mod logging;
mod state;

use config::{Config, init_config, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "reledger",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("RELEDGER_BUILD_SHA"), ")"),
    about = "Reshape credit-card statement exports into the canonical ledger layout"
)]
struct Cli {
    /// More output: -v debug, -vv per-row trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ~/.reledger/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover statements in a directory, convert legacy .xls, then transform
    Run {
        /// Directory to scan (default: current directory)
        dir: Option<PathBuf>,

        /// Skip the legacy .xls conversion phase
        #[arg(long, default_value_t = false)]
        no_convert: bool,

        /// Write the batch report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Transform the given statement files (no discovery, no conversion)
    Transform {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the batch report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Convert legacy .xls statements to .xlsx only
    Convert {
        /// Directory to scan (default: current directory)
        dir: Option<PathBuf>,
    },

    /// Manage ~/.reledger/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config unless one exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    logging::init_logging(&logging::level_for(cli.verbose, &cfg.logging.level));
    debug!(prefix = %cfg.input.file_prefix, window = ?cfg.header_window, "config loaded");

    match cli.command {
        Command::Run {
            dir,
            no_convert,
            report,
        } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let summary = run_directory(&cfg, &dir, !no_convert && cfg.input.convert_legacy)?;
            finish(&summary, report.as_deref())?;
        }

        Command::Transform { files, report } => {
            let options = PipelineOptions {
                window: cfg.header_window()?,
            };
            let summary = run_batch(&files, &options).context("transform aborted")?;
            finish(&summary, report.as_deref())?;
        }

        Command::Convert { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let found = discover_in(&cfg, &dir)?;
            let (summary, _) = convert_batch(&found.legacy);
            finish(&summary, None)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn discover_in(cfg: &Config, dir: &Path) -> Result<reledger_ingest::Discovered> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }
    discover(dir, &cfg.input.file_prefix).with_context(|| format!("scanning {}", dir.display()))
}

/// Legacy conversion phase (optional) followed by the transform phase.
fn run_directory(cfg: &Config, dir: &Path, convert: bool) -> Result<BatchReport> {
    let options = PipelineOptions {
        window: cfg.header_window()?,
    };
    let mut found = discover_in(cfg, dir)?;
    let mut summary = BatchReport::default();

    if convert && !found.legacy.is_empty() {
        let (converted_report, converted) = convert_batch(&found.legacy);
        summary.extend(converted_report);
        found.merge_converted(converted);
    }

    if found.transform.is_empty() {
        println!(
            "No statements starting with '{}' in {}",
            cfg.input.file_prefix,
            dir.display()
        );
    }

    let transformed = run_batch(&found.transform, &options).context("transform aborted")?;
    summary.extend(transformed);
    Ok(summary)
}

fn finish(summary: &BatchReport, report_path: Option<&Path>) -> Result<()> {
    print_summary(summary);
    if let Some(p) = report_path {
        let json = summary.to_json().context("serialize report")?;
        fs::write(p, json).with_context(|| format!("write {}", p.display()))?;
        println!("\nReport: {}", p.display());
    }
    Ok(())
}

fn print_summary(summary: &BatchReport) {
    for f in &summary.files {
        let name = f.source.display();
        match &f.status {
            FileStatus::Transformed { output, mop, rows, .. } => {
                println!("[ok]      {name} -> {} ({rows} rows, MOP {mop})", output.display())
            }
            FileStatus::Converted { output } => {
                println!("[convert] {name} -> {}", output.display())
            }
            FileStatus::Skipped { reason } => println!("[skip]    {name}: {reason}"),
            FileStatus::SaveFailed { reason } => println!("[fail]    {name}: {reason}"),
            FileStatus::ConvertFailed { reason } => println!("[fail]    {name}: {reason}"),
        }
    }
    println!(
        "\nTransformed {} file(s), {} row(s); converted {}; skipped {}; failed {}",
        summary.transformed(),
        summary.rows_written(),
        summary.converted(),
        summary.skipped(),
        summary.failed()
    );
}
