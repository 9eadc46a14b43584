pub mod github;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;
use types::GithubRepo;

/// The one failure the project feed reports. Network errors, non-2xx
/// statuses and undecodable payloads all collapse into it.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct FetchError(#[from] anyhow::Error);

#[async_trait]
pub trait RepoFeed: Send + Sync {
    /// One best-effort listing request. No retries.
    async fn fetch_repos(&self) -> Result<Vec<GithubRepo>, FetchError>;
}
