use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::Config;

/// API version header value required by GitHub's REST API.
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("vibe2code-landing/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub pushed_at: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub fork: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub followers: u32,
    pub public_repos: u32,
}

/// Failures of a GitHub fetch. The status variant's message is shown to
/// visitors verbatim on the error card, so it carries the numeric status.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub API error {status}")]
    Status { status: u16 },

    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

fn client() -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Fetch the user's public repositories, newest-updated first.
///
/// Only the first page is requested (`per_page=100`); users with more than
/// 100 repositories are truncated. That is a known scope limit.
pub async fn fetch_repositories(config: &Config) -> Result<Vec<Repository>, FetchError> {
    let url = format!(
        "{}/users/{}/repos",
        config.github_api_url, config.github_user
    );

    let response = client()?
        .get(&url)
        .query(&[("per_page", "100"), ("sort", "updated")])
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let repos: Vec<Repository> = response.json().await?;
    info!("Fetched {} repositories for @{}", repos.len(), config.github_user);

    Ok(repos)
}

/// Fetch follower/repo counts for the user.
///
/// Display of these counters is best-effort; the caller logs and swallows
/// any error so a failure here never blocks repository rendering.
pub async fn fetch_user_profile(config: &Config) -> Result<UserProfile, FetchError> {
    let url = format!("{}/users/{}", config.github_api_url, config.github_user);

    let response = client()?
        .get(&url)
        .header("Accept", "application/vnd.github+json")
        .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let profile: UserProfile = response.json().await?;
    info!(
        "Fetched profile for @{}: {} followers, {} public repos",
        config.github_user, profile.followers, profile.public_repos
    );

    Ok(profile)
}
