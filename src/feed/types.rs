use serde::Deserialize;

pub const DESCRIPTION_PLACEHOLDER: &str = "No description provided.";
pub const LANGUAGE_PLACEHOLDER: &str = "Code";

/// GitHub `/users/{user}/repos` response item. Only the fields we show.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GithubRepo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub html_url: String,
}

/// Normalized project shown on a card. Every field is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub name: String,
    pub description: String,
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    pub url: String,
}

impl ProjectRecord {
    /// Normalize a raw repo. Returns `None` when the repo has no name or url.
    pub fn from_repo(repo: GithubRepo) -> Option<Self> {
        if repo.name.trim().is_empty() || repo.html_url.trim().is_empty() {
            return None;
        }
        Some(Self {
            name: repo.name,
            description: non_empty_or(repo.description, DESCRIPTION_PLACEHOLDER),
            language: non_empty_or(repo.language, LANGUAGE_PLACEHOLDER),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            url: repo.html_url,
        })
    }

    pub fn lang_key(&self) -> String {
        lang_key(&self.language)
    }
}

fn non_empty_or(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder.to_string(),
    }
}

/// Style key for a language badge: lowercased, letters a-z only.
/// "C++" and "C#" both map to "c".
pub fn lang_key(language: &str) -> String {
    language
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}
