//! Comment publishing against the GitHub issues API
//!
//! `upsert_comment` keeps one report comment per pull request: the newest
//! bot-authored comment carrying the report marker is rewritten in place,
//! and a fresh comment is posted when none exists. `publish_report` wraps
//! that in never-fail semantics so a broken token or a flaky API cannot
//! fail the CI job that invoked us.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::render::COMMENT_MARKER;

pub mod github;

pub use github::GithubClient;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid repository slug '{0}': expected OWNER/REPO")]
    InvalidRepo(String),
}

/// The pull request a report comment belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl RepoTarget {
    /// Splits an `OWNER/REPO` slug, the shape `GITHUB_REPOSITORY` carries.
    pub fn from_slug(slug: &str, number: u64) -> Result<Self, PublishError> {
        match slug.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self { owner: owner.to_string(), repo: repo.to_string(), number })
            }
            _ => Err(PublishError::InvalidRepo(slug.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentAuthor {
    pub login: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
    pub user: Option<CommentAuthor>,
    pub created_at: Option<DateTime<Utc>>,
}

impl IssueComment {
    /// GitHub marks automation accounts with `"type": "Bot"`. Human
    /// replies quoting the report must never be rewritten.
    pub fn is_bot(&self) -> bool {
        self.user.as_ref().map(|user| user.kind == "Bot").unwrap_or(false)
    }
}

/// Minimal comment API surface, implemented by [`GithubClient`] and by
/// test doubles.
pub trait CommentApi {
    fn list_comments(&self, target: &RepoTarget) -> Result<Vec<IssueComment>, PublishError>;

    fn create_comment(
        &self,
        target: &RepoTarget,
        body: &str,
    ) -> Result<IssueComment, PublishError>;

    fn update_comment(
        &self,
        target: &RepoTarget,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, PublishError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Created { id: u64 },
    Updated { id: u64 },
}

/// Ensures exactly one report comment on the PR carries the given body.
/// Performs one list call and exactly one write call.
pub fn upsert_comment<A: CommentApi + ?Sized>(
    api: &A,
    target: &RepoTarget,
    body: &str,
) -> Result<UpsertAction, PublishError> {
    let comments = api.list_comments(target)?;
    match select_existing(&comments) {
        Some(existing) => {
            let updated = api.update_comment(target, existing.id, body)?;
            Ok(UpsertAction::Updated { id: updated.id })
        }
        None => {
            let created = api.create_comment(target, body)?;
            Ok(UpsertAction::Created { id: created.id })
        }
    }
}

/// The newest bot comment containing the marker. Two runs racing can leave
/// multiple marked comments behind; taking the latest `created_at` (ties
/// broken by highest id) makes every later run converge on the same one.
fn select_existing(comments: &[IssueComment]) -> Option<&IssueComment> {
    comments
        .iter()
        .filter(|comment| comment.is_bot() && comment.body.contains(COMMENT_MARKER))
        .max_by_key(|comment| (comment.created_at, comment.id))
}

/// How a publish attempt ended. `Failed` is a value, not an error: the
/// caller logs it and the run still succeeds.
#[derive(Debug)]
pub enum PublishOutcome {
    Created { id: u64 },
    Updated { id: u64 },
    Failed { error: PublishError },
}

pub fn publish_report<A: CommentApi + ?Sized>(
    api: &A,
    target: &RepoTarget,
    body: &str,
) -> PublishOutcome {
    match upsert_comment(api, target, body) {
        Ok(UpsertAction::Updated { id }) => PublishOutcome::Updated { id },
        Ok(UpsertAction::Created { id }) => PublishOutcome::Created { id },
        Err(error) => PublishOutcome::Failed { error },
    }
}
