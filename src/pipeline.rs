//! Project feed pipeline: fetch, select, render. Runs once per launch.

use tokio::sync::watch;

use crate::engine::selector::{select_projects, ProjectSelection};
use crate::feed::RepoFeed;
use crate::tui::state::AppState;

/// Fetch and pick the projects to show. Never fails: a broken or sparse
/// feed yields the built-in list.
pub async fn load_projects(feed: &dyn RepoFeed) -> ProjectSelection {
    let outcome = feed.fetch_repos().await;
    select_projects(outcome)
}

/// Load projects and render them into the shared UI state.
pub async fn run(feed: &dyn RepoFeed, state_tx: &watch::Sender<AppState>) -> ProjectSelection {
    let selection = load_projects(feed).await;
    tracing::info!(
        source = selection.source.label(),
        count = selection.projects.len(),
        "projects ready"
    );
    let shown = selection.clone();
    state_tx.send_modify(move |s| s.show_projects(shown));
    selection
}
