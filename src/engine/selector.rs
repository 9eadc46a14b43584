//! Chooses between remote projects and the built-in list.

use crate::feed::github::ACCOUNT;
use crate::feed::types::{GithubRepo, ProjectRecord};
use crate::feed::FetchError;

/// Fewer remote projects than this and the built-in list is shown instead,
/// so a near-empty account never looks sparse.
pub const MIN_REMOTE_PROJECTS: usize = 4;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSource {
    Remote,
    Fallback,
}

impl ProjectSource {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectSource::Remote => "GitHub",
            ProjectSource::Fallback => "built-in",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSelection {
    pub source: ProjectSource,
    pub projects: Vec<ProjectRecord>,
}

/// Decide what the project grid shows for a fetch outcome.
///
/// A failed fetch and a sparse one are treated the same way.
pub fn select_projects(outcome: Result<Vec<GithubRepo>, FetchError>) -> ProjectSelection {
    let repos = match outcome {
        Ok(repos) => repos,
        Err(e) => {
            tracing::warn!(error = %e, "project fetch failed, using built-in projects");
            Vec::new()
        }
    };

    let projects: Vec<ProjectRecord> = repos
        .into_iter()
        .filter_map(ProjectRecord::from_repo)
        .collect();

    if projects.len() >= MIN_REMOTE_PROJECTS {
        ProjectSelection { source: ProjectSource::Remote, projects }
    } else {
        tracing::info!(count = projects.len(), "too few remote projects, using built-in projects");
        ProjectSelection { source: ProjectSource::Fallback, projects: fallback_projects() }
    }
}

/// The fixed six projects shown when GitHub can't fill the grid.
pub fn fallback_projects() -> Vec<ProjectRecord> {
    fn project(name: &str, description: &str, language: &str, stars: u64, forks: u64, url: &str) -> ProjectRecord {
        ProjectRecord {
            name: name.to_string(),
            description: description.to_string(),
            language: language.to_string(),
            stars,
            forks,
            url: url.to_string(),
        }
    }

    let account_url = format!("https://github.com/{}", ACCOUNT);
    let site_url = format!("https://github.com/{0}/{0}.github.io", ACCOUNT);

    vec![
        project(
            "ride-share-app",
            "A complete ride-sharing application with real-time tracking, built with Flutter and Firebase.",
            "Dart", 12, 3, &account_url,
        ),
        project(
            "interview-prep-ai",
            "AI-powered interview preparation app with speech recognition and intelligent feedback.",
            "JavaScript", 8, 2, &account_url,
        ),
        project(
            "expense-tracker",
            "Voice-enabled expense tracking app with AI categorization and group splitting.",
            "Dart", 15, 5, &account_url,
        ),
        project(
            "crm-dashboard",
            "Modern CRM dashboard with lead management, call tracking, and analytics built with React.",
            "JavaScript", 6, 1, &account_url,
        ),
        project(
            "bus-tracking-system",
            "Real-time bus tracking system with GPS speed calculation and ETA prediction.",
            "Dart", 10, 4, &account_url,
        ),
        project(
            "portfolio-website",
            "My personal portfolio website, a GitHub-themed dark-mode experience. You're looking at it right now!",
            "HTML", 3, 0, &site_url,
        ),
    ]
}
