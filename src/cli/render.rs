//! Render command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use super::ScanInputs;
use crate::domain::ScanOutcome;
use crate::render::render_report;
use crate::scan::read_results;

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub scan: ScanInputs,

    /// Write the rendered Markdown here instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let (config, signals) = args.scan.resolve()?;

    let parsed = read_results(&config.results_file);
    let outcome = ScanOutcome::classify(parsed, signals.exit_code.as_deref());
    let body = render_report(&outcome, &signals, &config.dashboard_org);

    match args.output {
        Some(path) => {
            fs::write(&path, &body)
                .with_context(|| format!("Failed writing report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{body}"),
    }

    Ok(())
}
