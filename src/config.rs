use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::engine::theme::Theme;
use crate::feed::github::ACCOUNT;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_base() -> String { "https://api.github.com".to_string() }
fn default_handle() -> String { ACCOUNT.to_string() }
fn default_user_agent() -> String { format!("folio/{}", env!("CARGO_PKG_VERSION")) }

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Redraw interval for animations (smooth scroll, reveal fades).
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Theme used when no preference has been saved yet.
    #[serde(default)]
    pub default_theme: Theme,
    /// Below this terminal width the nav links collapse into a menu.
    #[serde(default = "default_compact_width")]
    pub compact_width: u16,
    #[serde(default = "default_header_shadow_rows")]
    pub header_shadow_rows: u16,
    /// Rows cut from the bottom of the viewport before reveal checks.
    #[serde(default = "default_reveal_margin_rows")]
    pub reveal_margin_rows: u16,
}

fn default_tick_ms() -> u64 { 50 }
fn default_compact_width() -> u16 { 80 }
fn default_header_shadow_rows() -> u16 { 2 }
fn default_reveal_margin_rows() -> u16 { 2 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            default_theme: Theme::default(),
            compact_width: default_compact_width(),
            header_shadow_rows: default_header_shadow_rows(),
            reveal_margin_rows: default_reveal_margin_rows(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreferencesConfig {
    #[serde(default = "default_preferences_path")]
    pub path: PathBuf,
}

fn default_preferences_path() -> PathBuf { PathBuf::from("folio-prefs.json") }

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self { path: default_preferences_path() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProfileConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_handle")]
    pub handle: String,
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,
    #[serde(default = "default_skills")]
    pub skills: Vec<String>,
    #[serde(default = "default_contacts")]
    pub contacts: Vec<ContactConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ContactConfig {
    pub label: String,
    pub value: String,
    pub url: String,
}

fn default_name() -> String { "Niru".to_string() }

fn default_phrases() -> Vec<String> {
    vec![
        "Full-Stack Developer 🚀".to_string(),
        "Flutter Enthusiast 💙".to_string(),
        "Open Source Contributor 🌟".to_string(),
        "Building the future, one commit at a time 💻".to_string(),
    ]
}

fn default_skills() -> Vec<String> {
    ["Dart", "Flutter", "Firebase", "JavaScript", "React", "Node.js", "HTML", "CSS", "Git"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_contacts() -> Vec<ContactConfig> {
    vec![
        ContactConfig {
            label: "GitHub".to_string(),
            value: "@Niru-26016".to_string(),
            url: "https://github.com/Niru-26016".to_string(),
        },
        ContactConfig {
            label: "Website".to_string(),
            value: "niru-26016.github.io".to_string(),
            url: "https://niru-26016.github.io".to_string(),
        },
    ]
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            handle: default_handle(),
            phrases: default_phrases(),
            skills: default_skills(),
            contacts: default_contacts(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ui.tick_ms == 0 {
            anyhow::bail!("ui.tick_ms must be greater than zero");
        }
        if self.profile.phrases.is_empty() {
            anyhow::bail!("profile.phrases cannot be empty");
        }
        Ok(())
    }

    /// Config path from `--config <path>`, falling back to `config.toml`.
    pub fn path_from_args(args: &[String]) -> PathBuf {
        args.iter()
            .position(|a| a == "--config")
            .and_then(|i| args.get(i + 1))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}
