//! Page layout and the TUI-local view state: scroll position, the
//! compact nav menu, card selection and reveal-on-scroll bookkeeping.

use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use super::state::AppState;
use crate::config::UiConfig;
use crate::engine::contributions::DAYS_PER_WEEK;
use crate::engine::reveal::{is_intersecting, Extent, RevealOptions, RevealTracker};

pub const HERO_HEIGHT: u16 = 7;
/// Month row, seven day rows, a spacer and the legend, plus borders.
pub const GRAPH_HEIGHT: u16 = DAYS_PER_WEEK as u16 + 5;
pub const CARD_HEIGHT: u16 = 7;
pub const SKILL_WIDTH: u16 = 16;
pub const SKILL_HEIGHT: u16 = 3;
pub const CONTACT_WIDTH: u16 = 34;
pub const CONTACT_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Contributions,
    Projects,
    Skills,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::About,
        Section::Contributions,
        Section::Projects,
        Section::Skills,
        Section::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Contributions => "Contributions",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Contact => "Contact",
        }
    }

    /// Section for a `1`-`5` key press.
    pub fn from_digit(c: char) -> Option<Section> {
        let i = c.to_digit(10)? as usize;
        Section::ALL.get(i.checked_sub(1)?).copied()
    }
}

/// Elements that animate in on scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Project { generation: u64, index: usize },
    Skill(usize),
    Contact(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: ElementId,
    /// Page coordinates.
    pub area: Rect,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: u16,
    pub height: u16,
    pub sections: Vec<(Section, Rect)>,
    pub elements: Vec<Placement>,
}

impl PageLayout {
    pub fn section(&self, section: Section) -> Option<Rect> {
        self.sections.iter().find(|(s, _)| *s == section).map(|(_, r)| *r)
    }

    pub fn placement(&self, id: ElementId) -> Option<&Placement> {
        self.elements.iter().find(|p| p.id == id)
    }
}

pub fn project_columns(width: u16) -> u16 {
    if width >= 110 {
        3
    } else if width >= 64 {
        2
    } else {
        1
    }
}

/// Lay out `count` equal boxes in rows inside a bordered section.
fn flow(
    top: u16,
    width: u16,
    count: usize,
    columns: u16,
    item_width: Option<u16>,
    item_height: u16,
) -> (Vec<Rect>, u16) {
    let inner_width = width.saturating_sub(2);
    let columns = columns.max(1);
    // Fixed-size boxes shrink to the section on narrow terminals.
    let item_width = item_width.unwrap_or(inner_width / columns).min(inner_width);
    let rects = (0..count)
        .map(|i| {
            let col = (i as u16) % columns;
            let row = (i as u16) / columns;
            Rect::new(1 + col * item_width, top + 1 + row * item_height, item_width, item_height)
        })
        .collect();
    let rows = (count as u16).div_ceil(columns).max(1);
    (rects, rows * item_height + 2)
}

pub fn layout(state: &AppState, width: u16) -> PageLayout {
    let mut sections = Vec::with_capacity(Section::ALL.len());
    let mut elements = Vec::new();
    let mut y = 0u16;

    sections.push((Section::About, Rect::new(0, y, width, HERO_HEIGHT)));
    y += HERO_HEIGHT;

    sections.push((Section::Contributions, Rect::new(0, y, width, GRAPH_HEIGHT)));
    y += GRAPH_HEIGHT;

    let cards = state.projects.cards();
    let height = if state.projects.is_rendered() {
        let (rects, height) = flow(y, width, cards.len(), project_columns(width), None, CARD_HEIGHT);
        let generation = state.projects.generation();
        for (index, (area, card)) in rects.into_iter().zip(cards).enumerate() {
            elements.push(Placement {
                id: ElementId::Project { generation, index },
                area,
                delay: card.reveal_delay,
            });
        }
        height
    } else {
        3
    };
    sections.push((Section::Projects, Rect::new(0, y, width, height)));
    y += height;

    let inner = width.saturating_sub(2);
    let skills = &state.profile.skills;
    let (rects, height) = flow(y, width, skills.len(), (inner / SKILL_WIDTH).max(1), Some(SKILL_WIDTH), SKILL_HEIGHT);
    for (i, area) in rects.into_iter().enumerate() {
        elements.push(Placement { id: ElementId::Skill(i), area, delay: Duration::ZERO });
    }
    sections.push((Section::Skills, Rect::new(0, y, width, height)));
    y += height;

    let contacts = &state.profile.contacts;
    let (rects, height) = flow(y, width, contacts.len(), (inner / CONTACT_WIDTH).max(1), Some(CONTACT_WIDTH), CONTACT_HEIGHT);
    for (i, area) in rects.into_iter().enumerate() {
        elements.push(Placement { id: ElementId::Contact(i), area, delay: Duration::ZERO });
    }
    sections.push((Section::Contact, Rect::new(0, y, width, height)));
    y += height;

    PageLayout { width, height: y, sections, elements }
}

#[derive(Debug)]
pub struct ViewState {
    pub scroll: u16,
    target: u16,
    pub menu_open: bool,
    pub menu_index: usize,
    pub selected_card: Option<usize>,
    pub reveal: RevealTracker<ElementId>,
    reveal_options: RevealOptions,
    seen_generation: u64,
    shadow_after: u16,
    compact_width: u16,
}

impl ViewState {
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            scroll: 0,
            target: 0,
            menu_open: false,
            menu_index: 0,
            selected_card: None,
            reveal: RevealTracker::new(),
            reveal_options: RevealOptions {
                bottom_margin: ui.reveal_margin_rows,
                ..RevealOptions::default()
            },
            seen_generation: 0,
            shadow_after: ui.header_shadow_rows,
            compact_width: ui.compact_width,
        }
    }

    pub fn is_compact(&self, width: u16) -> bool {
        width < self.compact_width
    }

    pub fn header_shadow(&self) -> bool {
        self.scroll > self.shadow_after
    }

    /// Immediate scroll, e.g. from j/k.
    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        let next = (self.scroll as i32 + delta).clamp(0, max_scroll as i32) as u16;
        self.scroll = next;
        self.target = next;
    }

    /// Eased scroll toward `row`; progresses on [`ViewState::tick`].
    pub fn scroll_to(&mut self, row: u16, max_scroll: u16) {
        self.target = row.min(max_scroll);
    }

    /// Ease just far enough that `area` sits inside the viewport.
    pub fn ensure_visible(&mut self, area: Rect, viewport_height: u16, max_scroll: u16) {
        let bottom = area.y + area.height;
        if area.y < self.target {
            self.scroll_to(area.y, max_scroll);
        } else if bottom > self.target + viewport_height {
            self.scroll_to(bottom.saturating_sub(viewport_height), max_scroll);
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll != self.target
    }

    /// Move a third of the remaining distance, at least one row.
    pub fn tick(&mut self, max_scroll: u16) {
        self.target = self.target.min(max_scroll);
        self.scroll = self.scroll.min(max_scroll);
        if self.scroll == self.target {
            return;
        }
        let diff = self.target as i32 - self.scroll as i32;
        let step = (diff.abs() / 3).max(1) * diff.signum();
        self.scroll = (self.scroll as i32 + step) as u16;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.menu_index = 0;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % Section::ALL.len();
    }

    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + Section::ALL.len() - 1) % Section::ALL.len();
    }

    /// Close the menu and head to `section`.
    pub fn navigate(&mut self, section: Section, layout: &PageLayout, viewport_height: u16) {
        self.close_menu();
        if let Some(area) = layout.section(section) {
            self.scroll_to(area.y, max_scroll(layout, viewport_height));
        }
    }

    pub fn select_next(&mut self, count: usize) {
        if count == 0 {
            self.selected_card = None;
            return;
        }
        self.selected_card = Some(match self.selected_card {
            Some(i) => (i + 1) % count,
            None => 0,
        });
    }

    pub fn select_prev(&mut self, count: usize) {
        if count == 0 {
            self.selected_card = None;
            return;
        }
        self.selected_card = Some(match self.selected_card {
            Some(i) => (i + count - 1) % count,
            None => count - 1,
        });
    }

    /// Register the elements in `layout` and fire reveals for those that
    /// intersect the viewport. Cards from an older render are forgotten.
    pub fn update_reveal(&mut self, layout: &PageLayout, generation: u64, viewport_height: u16, now: Instant) {
        if generation != self.seen_generation {
            self.reveal.retain(|id| match id {
                ElementId::Project { generation: g, .. } => *g == generation,
                _ => true,
            });
            self.selected_card = None;
            self.seen_generation = generation;
        }

        let viewport = Extent::new(self.scroll, viewport_height);
        for placement in &layout.elements {
            self.reveal.observe(placement.id, placement.delay);
            let extent = Extent::new(placement.area.y, placement.area.height);
            let hit = is_intersecting(extent, viewport, &self.reveal_options);
            if self.reveal.on_intersection(&placement.id, hit, now) {
                tracing::trace!(element = ?placement.id, "revealed");
            }
        }
    }
}

pub fn max_scroll(layout: &PageLayout, viewport_height: u16) -> u16 {
    layout.height.saturating_sub(viewport_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileConfig;
    use crate::engine::contributions::ContributionGraph;
    use crate::engine::reveal::RevealPhase;
    use crate::engine::selector::{fallback_projects, ProjectSelection, ProjectSource};
    use crate::engine::theme::Theme;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state_with_projects() -> AppState {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let graph = ContributionGraph::generate(today, &mut StdRng::seed_from_u64(5));
        let mut s = AppState::new(ProfileConfig::default(), Theme::Dark, graph);
        s.show_projects(ProjectSelection { source: ProjectSource::Fallback, projects: fallback_projects() });
        s
    }

    #[test]
    fn test_sections_stack_in_order() {
        let l = layout(&state_with_projects(), 100);
        let tops: Vec<u16> = l.sections.iter().map(|(_, r)| r.y).collect();
        assert!(tops.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(l.section(Section::About).unwrap().y, 0);
        assert_eq!(l.section(Section::Contributions).unwrap().y, HERO_HEIGHT);
        let last = l.sections.last().unwrap().1;
        assert_eq!(l.height, last.y + last.height);
    }

    #[test]
    fn test_project_cards_wrap_by_columns() {
        let s = state_with_projects();
        let l = layout(&s, 100);
        let cards: Vec<_> = l.elements.iter()
            .filter(|p| matches!(p.id, ElementId::Project { .. }))
            .collect();
        assert_eq!(cards.len(), 6);
        // Two columns at width 100: cards 0 and 1 share a row.
        assert_eq!(cards[0].area.y, cards[1].area.y);
        assert_eq!(cards[2].area.y, cards[0].area.y + CARD_HEIGHT);
        assert_eq!(cards[3].delay, Duration::from_millis(300));
        let projects = l.section(Section::Projects).unwrap();
        assert_eq!(projects.height, 3 * CARD_HEIGHT + 2);
    }

    #[test]
    fn test_boxes_stay_inside_narrow_page() {
        let s = state_with_projects();
        for width in [1u16, 15, 20, 30, 33] {
            let l = layout(&s, width);
            for p in &l.elements {
                assert!(p.area.x + p.area.width <= width, "{:?} at width {}", p.id, width);
            }
        }
    }

    #[test]
    fn test_projects_placeholder_before_render() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let graph = ContributionGraph::generate(today, &mut StdRng::seed_from_u64(5));
        let s = AppState::new(ProfileConfig::default(), Theme::Dark, graph);
        let l = layout(&s, 100);
        assert_eq!(l.section(Section::Projects).unwrap().height, 3);
        assert!(!l.elements.iter().any(|p| matches!(p.id, ElementId::Project { .. })));
    }

    #[test]
    fn test_section_from_digit() {
        assert_eq!(Section::from_digit('1'), Some(Section::About));
        assert_eq!(Section::from_digit('5'), Some(Section::Contact));
        assert_eq!(Section::from_digit('0'), None);
        assert_eq!(Section::from_digit('6'), None);
    }

    #[test]
    fn test_smooth_scroll_reaches_target() {
        let mut v = ViewState::new(&UiConfig::default());
        v.scroll_to(30, 100);
        let mut ticks = 0;
        while v.is_scrolling() {
            v.tick(100);
            ticks += 1;
            assert!(ticks < 50);
        }
        assert_eq!(v.scroll, 30);
        assert!(ticks > 1);
    }

    #[test]
    fn test_scroll_target_clamped() {
        let mut v = ViewState::new(&UiConfig::default());
        v.scroll_to(500, 40);
        while v.is_scrolling() {
            v.tick(40);
        }
        assert_eq!(v.scroll, 40);
        v.scroll_by(-100, 40);
        assert_eq!(v.scroll, 0);
    }

    #[test]
    fn test_header_shadow_after_threshold() {
        let mut v = ViewState::new(&UiConfig::default());
        assert!(!v.header_shadow());
        v.scroll_by(2, 100);
        assert!(!v.header_shadow());
        v.scroll_by(1, 100);
        assert!(v.header_shadow());
    }

    #[test]
    fn test_menu_navigation_closes_menu() {
        let s = state_with_projects();
        let l = layout(&s, 60);
        let mut v = ViewState::new(&UiConfig::default());
        assert!(v.is_compact(60));
        v.toggle_menu();
        assert!(v.menu_open);
        v.navigate(Section::Projects, &l, 10);
        assert!(!v.menu_open);
        while v.is_scrolling() {
            v.tick(max_scroll(&l, 10));
        }
        assert_eq!(v.scroll, l.section(Section::Projects).unwrap().y);
    }

    #[test]
    fn test_ensure_visible_scrolls_down_and_up() {
        let mut v = ViewState::new(&UiConfig::default());
        v.ensure_visible(Rect::new(0, 40, 10, 7), 20, 100);
        while v.is_scrolling() {
            v.tick(100);
        }
        assert_eq!(v.scroll, 27);
        v.ensure_visible(Rect::new(0, 5, 10, 7), 20, 100);
        while v.is_scrolling() {
            v.tick(100);
        }
        assert_eq!(v.scroll, 5);
    }

    #[test]
    fn test_card_selection_wraps() {
        let mut v = ViewState::new(&UiConfig::default());
        v.select_prev(3);
        assert_eq!(v.selected_card, Some(2));
        v.select_next(3);
        assert_eq!(v.selected_card, Some(0));
        v.select_next(0);
        assert_eq!(v.selected_card, None);
    }

    #[test]
    fn test_only_visible_elements_reveal() {
        let s = state_with_projects();
        let l = layout(&s, 100);
        let mut v = ViewState::new(&UiConfig::default());
        let now = Instant::now();
        v.update_reveal(&l, s.projects.generation(), 20, now);

        let first = ElementId::Project { generation: s.projects.generation(), index: 0 };
        let last_contact = ElementId::Contact(s.profile.contacts.len() - 1);
        // The projects section starts below a 20-row viewport.
        assert!(!v.reveal.is_triggered(&first));
        assert!(!v.reveal.is_triggered(&last_contact));

        v.scroll_by(i32::from(l.section(Section::Projects).unwrap().y), max_scroll(&l, 20));
        v.update_reveal(&l, s.projects.generation(), 20, now);
        assert!(v.reveal.is_triggered(&first));
        assert_eq!(v.reveal.phase(&first, now + Duration::from_secs(1)), RevealPhase::Shown);
    }

    #[test]
    fn test_new_generation_forgets_old_cards() {
        let mut s = state_with_projects();
        let mut v = ViewState::new(&UiConfig::default());
        let l = layout(&s, 100);
        v.scroll_by(i32::from(l.section(Section::Projects).unwrap().y), max_scroll(&l, 30));
        v.update_reveal(&l, s.projects.generation(), 30, Instant::now());
        let old = ElementId::Project { generation: s.projects.generation(), index: 0 };
        assert!(v.reveal.is_triggered(&old));

        s.projects.render(&fallback_projects()[..2]);
        let l = layout(&s, 100);
        v.update_reveal(&l, s.projects.generation(), 30, Instant::now());
        assert!(!v.reveal.is_triggered(&old));
    }
}
