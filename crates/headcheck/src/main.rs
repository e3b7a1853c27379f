use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use headcheck_core::config::Config;
use headcheck_core::Linter;
use headcheck_report::{json, text};

#[derive(Parser)]
#[command(name = "headcheck")]
#[command(about = "Report source files whose copyright or SPDX header disagrees with the majority")]
#[command(version)]
struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    dir: PathBuf,
    /// Update files in place
    #[arg(short = 'w')]
    write: bool,
    /// Verbose: explain every violation
    #[arg(short = 'v')]
    verbose: bool,
    /// Config file path (defaults to .headcheck.toml in the scanned directory)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output format for the suggested header
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(&cli.dir, cli.config.as_deref())?;
    let linter = Linter::new(config)?;
    let audit = linter
        .run(&cli.dir)
        .with_context(|| format!("failed to check '{}'", cli.dir.display()))?;

    eprint!("{}", text::format_findings(&audit, cli.verbose));

    if cli.write {
        let changed = linter.apply(&audit)?;
        tracing::info!(changed = changed.len(), "headers rewritten");
        if cli.verbose {
            eprintln!("{}", text::format_update_summary(changed.len()));
        }
        return Ok(());
    }

    match cli.format {
        OutputFormat::Json => {
            let report = json::format_report(&audit, false).context("failed to encode report")?;
            println!("{report}");
        }
        OutputFormat::Text => {
            if let Some(header) = text::format_suggested_header(&audit) {
                eprint!("{}", text::format_banner());
                print!("{header}");
            }
        }
    }
    Ok(())
}

fn load_config(dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            Config::load(p)
        }
        None => Ok(Config::load_or_default(dir)),
    }
}
