use std::collections::VecDeque;
use std::time::Instant;

use super::cards::ProjectGrid;
use crate::config::ProfileConfig;
use crate::engine::contributions::ContributionGraph;
use crate::engine::selector::{ProjectSelection, ProjectSource};
use crate::engine::theme::Theme;

const MAX_LOGS: usize = 50;

#[derive(Debug, Clone)]
pub struct AppState {
    pub profile: ProfileConfig,
    pub theme: Theme,
    pub hero_text: String,
    pub graph: ContributionGraph,
    pub graph_shown_at: Instant,
    pub projects: ProjectGrid,
    pub project_source: Option<ProjectSource>,
    pub logs: VecDeque<LogEntry>,
    pub start_time: Instant,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl AppState {
    pub fn new(profile: ProfileConfig, theme: Theme, graph: ContributionGraph) -> Self {
        let now = Instant::now();
        Self {
            profile,
            theme,
            hero_text: String::new(),
            graph,
            graph_shown_at: now,
            projects: ProjectGrid::default(),
            project_source: None,
            logs: VecDeque::with_capacity(MAX_LOGS),
            start_time: now,
        }
    }

    pub fn show_projects(&mut self, selection: ProjectSelection) {
        self.projects.render(&selection.projects);
        self.project_source = Some(selection.source);
        self.push_log(
            "INFO",
            format!("{} projects from {}", selection.projects.len(), selection.source.label()),
        );
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }
}
