//! Command-line interface for fossa-pr-report
//!
//! Provides `report`, `render`, and `completions` subcommands.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides, ReportConfig};
use crate::domain::ScanSignals;

mod render;
mod report;

/// Format FOSSA license scan results and publish them as PR comments
#[derive(Parser)]
#[command(name = "fossa-pr-report")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the scan report and create or update the PR comment
    Report(Box<report::ReportArgs>),

    /// Render the scan report to stdout or a file without publishing
    Render(render::RenderArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Scan result inputs shared by `report` and `render`. Each flag falls
/// back to the environment variable the CI workflow exports.
#[derive(Args, Debug, Clone)]
pub struct ScanInputs {
    /// Path to the scan results JSON file
    #[arg(long, value_name = "FILE", env = "FOSSA_RESULTS_FILE")]
    pub results_file: Option<PathBuf>,

    /// Project name shown in the report and dashboard links
    #[arg(short = 'p', long, value_name = "NAME", env = "FOSSA_PROJECT")]
    pub project: Option<String>,

    /// Scanner exit code, passed through as text
    #[arg(long, value_name = "CODE", env = "FOSSA_EXIT_CODE")]
    pub exit_code: Option<String>,

    /// Whether the scanner reported violations ('true' or anything else)
    #[arg(long, value_name = "BOOL", env = "VIOLATIONS_FOUND")]
    pub violations_found: Option<String>,

    /// Violation count reported by the scanner
    #[arg(long, value_name = "N", env = "VIOLATIONS_COUNT")]
    pub violations_count: Option<String>,

    /// Organization locator prefix for dashboard links
    #[arg(long, value_name = "ORG", env = "FOSSA_DASHBOARD_ORG")]
    pub dashboard_org: Option<String>,

    /// Path to config file (fossa-report.toml or .fossa-report.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ScanInputs {
    /// Resolves the effective configuration and per-run signals. Config is
    /// discovered in the current directory unless `--config` points at a
    /// specific file.
    pub fn resolve(&self) -> Result<(ReportConfig, ScanSignals)> {
        let cwd = std::env::current_dir()?;
        let file_config = load_config(&cwd, self.config.as_deref())?;
        let config = merge_cli_with_config(
            file_config,
            CliOverrides {
                results_file: self.results_file.clone(),
                project: self.project.clone(),
                dashboard_org: self.dashboard_org.clone(),
            },
        );

        let signals = ScanSignals {
            project: config.project.clone(),
            exit_code: self.exit_code.clone(),
            violations_found: self.violations_found.as_deref() == Some("true"),
            violations_count: self.violations_count.clone().unwrap_or_else(|| "0".to_string()),
        };

        Ok((config, signals))
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Report(args) => report::run(*args),
        Commands::Render(args) => render::run(args),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
