//! Project cards: one per record, in input order, staggered reveal.

use std::time::Duration;

use crate::feed::types::ProjectRecord;

/// Extra reveal delay per card position.
pub const REVEAL_STAGGER: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub name: String,
    pub description: String,
    pub language: String,
    pub lang_key: String,
    pub stars: u64,
    pub forks: u64,
    pub url: String,
    pub reveal_delay: Duration,
}

impl ProjectCard {
    fn new(record: &ProjectRecord, index: usize) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone(),
            language: record.language.clone(),
            lang_key: record.lang_key(),
            stars: record.stars,
            forks: record.forks,
            url: record.url.clone(),
            reveal_delay: REVEAL_STAGGER * index as u32,
        }
    }
}

/// The project grid container. Rendering replaces its contents.
#[derive(Debug, Clone, Default)]
pub struct ProjectGrid {
    cards: Vec<ProjectCard>,
    generation: u64,
}

impl ProjectGrid {
    pub fn render(&mut self, projects: &[ProjectRecord]) {
        self.cards = projects
            .iter()
            .enumerate()
            .map(|(i, p)| ProjectCard::new(p, i))
            .collect();
        self.generation += 1;
    }

    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    /// Bumped on every render so stale reveal state can be dropped.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False until the first render.
    pub fn is_rendered(&self) -> bool {
        self.generation > 0
    }
}
