pub mod cards;
pub mod palette;
pub mod render;
pub mod state;
pub mod view;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures_util::StreamExt;
use ratatui::prelude::*;
use state::AppState;
use std::io::stdout;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use view::{layout, max_scroll, ElementId, PageLayout, Section, ViewState};

use crate::config::UiConfig;

/// Commands the TUI sends back to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiCommand {
    Quit,
    ToggleTheme,
    OpenProject(String),
}

/// Run the TUI. Reads state from `state_rx`, sends commands on `cmd_tx`.
pub async fn run_tui(
    state_rx: watch::Receiver<AppState>,
    cmd_tx: mpsc::Sender<TuiCommand>,
    ui: UiConfig,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, state_rx, cmd_tx, &ui).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut state_rx: watch::Receiver<AppState>,
    cmd_tx: mpsc::Sender<TuiCommand>,
    ui: &UiConfig,
) -> Result<()> {
    let mut view = ViewState::new(ui);
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(ui.tick_ms));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        let state = state_rx.borrow_and_update().clone();
        let size = terminal.size()?;
        let viewport = render::viewport_height(size.height);
        let page = layout(&state, size.width);
        let now = Instant::now();

        view.tick(max_scroll(&page, viewport));
        view.update_reveal(&page, state.projects.generation(), viewport, now);
        terminal.draw(|f| render::draw(f, &state, &view, &page, now))?;

        tokio::select! {
            _ = tick.tick() => {}
            changed = state_rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        let action = handle_key(key, &mut view, &state, &page, viewport);
                        if let Some(cmd) = action {
                            let quit = cmd == TuiCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                return Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }
        }
    }
}

/// Apply a key press to the view. Returns a command for the app, if any.
fn handle_key(
    key: KeyEvent,
    view: &mut ViewState,
    state: &AppState,
    page: &PageLayout,
    viewport: u16,
) -> Option<TuiCommand> {
    let max = max_scroll(page, viewport);
    let card_count = state.projects.cards().len();

    if view.menu_open {
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => view.close_menu(),
            KeyCode::Down | KeyCode::Char('j') => view.menu_next(),
            KeyCode::Up | KeyCode::Char('k') => view.menu_prev(),
            KeyCode::Enter => view.navigate(Section::ALL[view.menu_index], page, viewport),
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(section) = Section::from_digit(c) {
                    view.navigate(section, page, viewport);
                }
            }
            KeyCode::Char('q') => return Some(TuiCommand::Quit),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') => return Some(TuiCommand::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(TuiCommand::Quit);
        }
        KeyCode::Char('t') => return Some(TuiCommand::ToggleTheme),
        KeyCode::Char('m') => view.toggle_menu(),
        KeyCode::Down | KeyCode::Char('j') => view.scroll_by(1, max),
        KeyCode::Up | KeyCode::Char('k') => view.scroll_by(-1, max),
        KeyCode::PageDown => view.scroll_by(i32::from(viewport.max(1)), max),
        KeyCode::PageUp => view.scroll_by(-i32::from(viewport.max(1)), max),
        KeyCode::Char('g') | KeyCode::Home => view.scroll_to(0, max),
        KeyCode::Char('G') | KeyCode::End => view.scroll_to(max, max),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(section) = Section::from_digit(c) {
                view.navigate(section, page, viewport);
            }
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if key.code == KeyCode::Tab {
                view.select_next(card_count);
            } else {
                view.select_prev(card_count);
            }
            if let Some(index) = view.selected_card {
                let id = ElementId::Project { generation: state.projects.generation(), index };
                if let Some(placement) = page.placement(id) {
                    view.ensure_visible(placement.area, viewport, max);
                }
            }
        }
        KeyCode::Enter => {
            let card = view.selected_card.and_then(|i| state.projects.cards().get(i));
            if let Some(card) = card {
                return Some(TuiCommand::OpenProject(card.url.clone()));
            }
        }
        KeyCode::Esc => view.selected_card = None,
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProfileConfig;
    use crate::engine::contributions::ContributionGraph;
    use crate::engine::selector::{fallback_projects, ProjectSelection, ProjectSource};
    use crate::engine::theme::Theme;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let graph = ContributionGraph::generate(today, &mut StdRng::seed_from_u64(2));
        let mut s = AppState::new(ProfileConfig::default(), Theme::Dark, graph);
        s.show_projects(ProjectSelection { source: ProjectSource::Fallback, projects: fallback_projects() });
        s
    }

    #[test]
    fn test_quit_and_theme_keys() {
        let s = state();
        let page = layout(&s, 100);
        let mut view = ViewState::new(&UiConfig::default());
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut view, &s, &page, 20), Some(TuiCommand::Quit));
        assert_eq!(handle_key(press(KeyCode::Char('t')), &mut view, &s, &page, 20), Some(TuiCommand::ToggleTheme));
    }

    #[test]
    fn test_tab_then_enter_opens_card_url() {
        let s = state();
        let page = layout(&s, 100);
        let mut view = ViewState::new(&UiConfig::default());
        assert_eq!(handle_key(press(KeyCode::Enter), &mut view, &s, &page, 20), None);
        handle_key(press(KeyCode::Tab), &mut view, &s, &page, 20);
        handle_key(press(KeyCode::Tab), &mut view, &s, &page, 20);
        let cmd = handle_key(press(KeyCode::Enter), &mut view, &s, &page, 20);
        assert_eq!(cmd, Some(TuiCommand::OpenProject(fallback_projects()[1].url.clone())));
        assert!(view.is_scrolling());
    }

    #[test]
    fn test_menu_enter_navigates() {
        let s = state();
        let page = layout(&s, 60);
        let mut view = ViewState::new(&UiConfig::default());
        handle_key(press(KeyCode::Char('m')), &mut view, &s, &page, 20);
        assert!(view.menu_open);
        handle_key(press(KeyCode::Down), &mut view, &s, &page, 20);
        handle_key(press(KeyCode::Down), &mut view, &s, &page, 20);
        assert_eq!(handle_key(press(KeyCode::Enter), &mut view, &s, &page, 20), None);
        assert!(!view.menu_open);
        while view.is_scrolling() {
            view.tick(max_scroll(&page, 20));
        }
        assert_eq!(view.scroll, page.section(Section::Projects).unwrap().y);
    }

    #[test]
    fn test_digit_jumps_to_section() {
        let s = state();
        let page = layout(&s, 100);
        let mut view = ViewState::new(&UiConfig::default());
        handle_key(press(KeyCode::Char('2')), &mut view, &s, &page, 20);
        while view.is_scrolling() {
            view.tick(max_scroll(&page, 20));
        }
        assert_eq!(view.scroll, page.section(Section::Contributions).unwrap().y);
    }
}
