//! Server configuration loaded from environment variables.

use anyhow::{Context, Result};

/// GitHub API access: which repository to browse and how to reach the API.
#[derive(Clone, Debug)]
pub struct GitHubConfig {
    pub owner: String,
    pub repo: String,
    /// Optional token; unauthenticated requests work but are rate limited.
    pub token: Option<String>,
    pub api_url: String,
}

impl GitHubConfig {
    pub fn from_env() -> Self {
        Self {
            owner: std::env::var("GITHUB_OWNER").unwrap_or_else(|_| "openai".to_string()),
            repo: std::env::var("GITHUB_REPO").unwrap_or_else(|_| "openai-node".to_string()),
            token: std::env::var("GITHUB_TOKEN").ok(),
            api_url: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
        }
    }
}

/// Chat-completion API access for note generation.
#[derive(Clone, Debug)]
pub struct NotesConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl NotesConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?,
            api_base: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "o4-mini".to_string()),
        })
    }
}

/// Full server configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub github: GitHubConfig,
    pub notes: NotesConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            github: GitHubConfig::from_env(),
            notes: NotesConfig::from_env()?,
        })
    }
}
