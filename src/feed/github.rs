use super::types::GithubRepo;
use super::{FetchError, RepoFeed};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::GithubConfig;

/// Repos requested per listing. The grid never shows more.
pub const PAGE_SIZE: u32 = 6;

/// The one GitHub account whose repos the portfolio lists.
pub const ACCOUNT: &str = "Niru-26016";

pub struct GithubFeed {
    client: Client,
    base_url: String,
}

impl GithubFeed {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Most recently updated repos first, capped at [`PAGE_SIZE`].
    pub fn repos_url(&self) -> String {
        format!(
            "{}/users/{}/repos?sort=updated&per_page={}",
            self.base_url, ACCOUNT, PAGE_SIZE,
        )
    }

    async fn list_repos(&self) -> Result<Vec<GithubRepo>> {
        let url = self.repos_url();
        let resp = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .context("GitHub repos request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("GitHub repos for {} failed ({}): {}", ACCOUNT, status, body);
        }

        let repos: Vec<GithubRepo> = resp
            .json()
            .await
            .context("failed to parse GitHub repos response")?;
        tracing::debug!(account = ACCOUNT, count = repos.len(), "fetched repos");
        Ok(repos)
    }
}

#[async_trait]
impl RepoFeed for GithubFeed {
    async fn fetch_repos(&self) -> Result<Vec<GithubRepo>, FetchError> {
        Ok(self.list_repos().await?)
    }
}
