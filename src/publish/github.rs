//! Blocking GitHub REST client for issue comments

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;

use super::{CommentApi, IssueComment, PublishError, RepoTarget};

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("fossa-pr-report/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One page covers typical PRs. A marker comment buried past it gets a
/// fresh comment instead of an update.
const PER_PAGE: u32 = 100;

pub struct GithubClient {
    http: Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct CommentPayload<'a> {
    body: &'a str,
}

impl GithubClient {
    /// `base_url` is `https://api.github.com` for github.com and the
    /// `GITHUB_API_URL` value on GitHub Enterprise.
    pub fn new(base_url: &str, token: &str) -> Result<Self, PublishError> {
        let http = Client::builder().user_agent(USER_AGENT).timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn comments_url(&self, target: &RepoTarget) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, target.owner, target.repo, target.number
        )
    }

    fn comment_url(&self, target: &RepoTarget, comment_id: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/comments/{}",
            self.base_url, target.owner, target.repo, comment_id
        )
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, PublishError> {
        let response = request
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .bearer_auth(&self.token)
            .send()?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(api_error(response))
        }
    }
}

impl CommentApi for GithubClient {
    fn list_comments(&self, target: &RepoTarget) -> Result<Vec<IssueComment>, PublishError> {
        let url = self.comments_url(target);
        tracing::debug!("GET {}", url);
        let response = self.send(self.http.get(&url).query(&[("per_page", PER_PAGE)]))?;
        Ok(response.json()?)
    }

    fn create_comment(
        &self,
        target: &RepoTarget,
        body: &str,
    ) -> Result<IssueComment, PublishError> {
        let url = self.comments_url(target);
        tracing::debug!("POST {}", url);
        let response = self.send(self.http.post(&url).json(&CommentPayload { body }))?;
        Ok(response.json()?)
    }

    fn update_comment(
        &self,
        target: &RepoTarget,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, PublishError> {
        let url = self.comment_url(target, comment_id);
        tracing::debug!("PATCH {}", url);
        let response = self.send(self.http.patch(&url).json(&CommentPayload { body }))?;
        Ok(response.json()?)
    }
}

/// GitHub error bodies carry a `message` field; fall back to a snippet of
/// whatever came back.
fn api_error(response: Response) -> PublishError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| snippet(&body));
    PublishError::Api { status, message }
}

fn snippet(body: &str) -> String {
    if body.is_empty() {
        return "empty response body".to_string();
    }
    let mut out: String = body.chars().take(200).collect();
    if body.chars().count() > 200 {
        out.push('…');
    }
    out
}
