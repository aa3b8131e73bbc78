//! Report command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::ScanInputs;
use crate::domain::ScanOutcome;
use crate::publish::{publish_report, GithubClient, PublishOutcome, RepoTarget};
use crate::render::render_report;
use crate::scan::read_results;
use crate::workflow;

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub scan: ScanInputs,

    /// Repository slug as OWNER/REPO
    #[arg(long, value_name = "SLUG", env = "GITHUB_REPOSITORY")]
    pub repo: String,

    /// Pull request number to comment on
    #[arg(long, value_name = "N", env = "PR_NUMBER")]
    pub pr: u64,

    /// API token used as the bearer credential
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GitHub API base URL
    #[arg(
        long,
        value_name = "URL",
        env = "GITHUB_API_URL",
        default_value = "https://api.github.com"
    )]
    pub api_url: String,
}

pub fn run(args: ReportArgs) -> Result<()> {
    let (config, signals) = args.scan.resolve()?;

    let parsed = read_results(&config.results_file);
    let outcome = ScanOutcome::classify(parsed, signals.exit_code.as_deref());
    let body = render_report(&outcome, &signals, &config.dashboard_org);

    // A bad slug is workflow misconfiguration; fail before touching the API.
    let target = RepoTarget::from_slug(&args.repo, args.pr)
        .with_context(|| format!("Invalid --repo value '{}'", args.repo))?;

    println!("Posting PR comment with FOSSA results...");
    println!(
        "Violations found: {}, Count: {}, Exit code: {}",
        signals.violations_found,
        signals.violations_count,
        signals.exit_code_display()
    );

    match publish(&args, &target, &body) {
        PublishOutcome::Updated { id } => {
            tracing::debug!("updated comment {}", id);
            println!("Updated existing FOSSA comment");
        }
        PublishOutcome::Created { id } => {
            tracing::debug!("created comment {}", id);
            println!("Posted new FOSSA comment");
        }
        PublishOutcome::Failed { error } => {
            tracing::error!("Error posting PR comment: {}", error);
            workflow::warning(&format!("Failed to post PR comment: {error}"));
        }
    }

    Ok(())
}

/// Builds the client and publishes. Client construction failures get the
/// same containment as API failures: this command never fails the job over
/// publishing.
fn publish(args: &ReportArgs, target: &RepoTarget, body: &str) -> PublishOutcome {
    let client = match GithubClient::new(&args.api_url, &args.token) {
        Ok(client) => client,
        Err(error) => return PublishOutcome::Failed { error },
    };
    publish_report(&client, target, body)
}
