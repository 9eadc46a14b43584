use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => anyhow::bail!("unknown theme: {:?}", other),
        }
    }
}

/// Durable storage for the theme preference.
pub trait PreferenceStore: Send {
    /// Saved theme, or `None` when nothing (valid) was saved.
    fn get(&self) -> Option<Theme>;
    fn set(&mut self, theme: Theme) -> Result<()>;
}

/// Key-value JSON file, e.g. `{"theme": "dark"}`. Other keys are preserved.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Map<String, Value> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self) -> Option<Theme> {
        let value = self.read_all().remove(THEME_KEY)?;
        let Some(raw) = value.as_str() else {
            tracing::warn!(path = %self.path.display(), %value, "ignoring non-string theme");
            return None;
        };
        match raw.parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring saved theme");
                None
            }
        }
    }

    fn set(&mut self, theme: Theme) -> Result<()> {
        let mut prefs = self.read_all();
        prefs.insert(THEME_KEY.to_string(), Value::from(theme.as_str()));
        let json = serde_json::to_string_pretty(&prefs).context("failed to encode preferences")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Option<Theme>,
}

impl MemoryPreferenceStore {
    pub fn new(value: Option<Theme>) -> Self {
        Self { value }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self) -> Option<Theme> {
        self.value
    }

    fn set(&mut self, theme: Theme) -> Result<()> {
        self.value = Some(theme);
        Ok(())
    }
}

/// Current theme plus the store it persists to. The store is read once.
pub struct ThemeToggle {
    store: Box<dyn PreferenceStore>,
    current: Theme,
}

impl ThemeToggle {
    pub fn new(store: Box<dyn PreferenceStore>, default: Theme) -> Self {
        let current = store.get().unwrap_or(default);
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip dark/light and save it. The flip sticks even if saving fails.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.current = self.current.toggled();
        self.store.set(self.current)?;
        Ok(self.current)
    }
}
