use anyhow::{Context, Result};

use crate::pipeline::SortMode;

#[derive(Debug, Clone)]
pub struct Config {
    // GitHub
    pub github_user: String,
    pub github_api_url: String,

    // Avatar
    pub avatar_url: String,
    pub avatar_fallback_url: String,

    // Display
    pub sort_mode: SortMode,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // GitHub
            github_user: std::env::var("GITHUB_USER")
                .unwrap_or_else(|_| "vibe2code".to_string()),
            github_api_url: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),

            // Avatar
            avatar_url: std::env::var("AVATAR_URL").unwrap_or_else(|_| {
                "https://avatars.githubusercontent.com/u/222844068?v=".to_string()
            }),
            avatar_fallback_url: std::env::var("AVATAR_FALLBACK_URL").unwrap_or_else(|_| {
                "https://avatars.githubusercontent.com/u/222844068".to_string()
            }),

            // Display
            sort_mode: std::env::var("SORT_MODE")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("Invalid SORT_MODE")?
                .unwrap_or_default(),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}
