//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File > Defaults).

use std::path::PathBuf;

use serde::Deserialize;

pub mod loader;

pub use loader::load_config;

/// Settings read from an optional `fossa-report.toml` / `.yml` file.
/// Everything is optional; defaults fill whatever remains after the
/// CLI and environment layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub results_file: Option<PathBuf>,
    pub project: Option<String>,
    pub dashboard_org: Option<String>,
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Where the scanner wrote its JSON results.
    pub results_file: PathBuf,
    /// Project name shown in the report and dashboard links.
    pub project: String,
    /// Organization locator prefix for dashboard links.
    pub dashboard_org: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            results_file: PathBuf::from("fossa-results.json"),
            project: "unknown".to_string(),
            dashboard_org: "custom+41069".to_string(),
        }
    }
}

/// Values taken from CLI flags and their environment fallbacks. `None`
/// defers to the config file, then to the defaults.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub results_file: Option<PathBuf>,
    pub project: Option<String>,
    pub dashboard_org: Option<String>,
}

pub fn merge_cli_with_config(file: FileConfig, cli: CliOverrides) -> ReportConfig {
    let defaults = ReportConfig::default();
    ReportConfig {
        results_file: cli.results_file.or(file.results_file).unwrap_or(defaults.results_file),
        project: cli.project.or(file.project).unwrap_or(defaults.project),
        dashboard_org: cli.dashboard_org.or(file.dashboard_org).unwrap_or(defaults.dashboard_org),
    }
}
