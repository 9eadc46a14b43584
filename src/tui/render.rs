use std::borrow::Cow;
use std::time::Instant;

use super::palette::{lang_color, Palette};
use super::state::AppState;
use super::view::{ElementId, PageLayout, Placement, Section, ViewState};
use crate::engine::contributions::{DAYS_PER_WEEK, WEEKS};
use crate::engine::reveal::RevealPhase;
use crate::engine::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Widget, Wrap},
    Frame,
};

pub const HEADER_HEIGHT: u16 = 2;
pub const FOOTER_HEIGHT: u16 = 1;
const MENU_WIDTH: u16 = 24;

/// Rows of page visible between the fixed header and footer.
pub fn viewport_height(total_height: u16) -> u16 {
    total_height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT)
}

pub fn draw(f: &mut Frame, state: &AppState, view: &ViewState, layout: &PageLayout, now: Instant) {
    let palette = Palette::for_theme(state.theme);
    let base = Style::default().fg(palette.fg).bg(palette.bg);
    f.render_widget(Block::default().style(base), f.area());

    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .split(f.area());

    draw_page(f, state, view, layout, chunks[1], now, &palette);
    draw_header(f, state, view, chunks[0], &palette);
    draw_footer(f, state, chunks[2], &palette);

    if view.menu_open {
        draw_menu(f, view, chunks[1], &palette);
    }
}

fn draw_header(f: &mut Frame, state: &AppState, view: &ViewState, area: Rect, palette: &Palette) {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", state.profile.name),
            Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("@{}  ", state.profile.handle), Style::default().fg(palette.muted)),
    ];

    if view.is_compact(area.width) {
        let icon = if view.menu_open { "✕" } else { "☰" };
        spans.push(Span::styled(format!("[m] {}", icon), Style::default().fg(palette.accent)));
    } else {
        for (i, section) in Section::ALL.iter().enumerate() {
            spans.push(Span::styled(format!("[{}]", i + 1), Style::default().fg(palette.accent)));
            spans.push(Span::styled(format!(" {}  ", section.label()), Style::default().fg(palette.fg)));
        }
    }

    let theme_icon = match state.theme {
        Theme::Dark => "☾",
        Theme::Light => "☀",
    };
    let right = Line::from(Span::styled(
        format!("[t] {} {} ", theme_icon, state.theme),
        Style::default().fg(palette.muted),
    ))
    .alignment(Alignment::Right);

    let block = if view.header_shadow() {
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Thick)
            .border_style(Style::default().fg(palette.shadow))
    } else {
        Block::default()
    };
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(Line::from(spans)), inner);
    f.render_widget(Paragraph::new(right), inner);
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect, palette: &Palette) {
    let key = Style::default().fg(palette.accent);
    let mut spans = vec![
        Span::styled("  [q]", key),
        Span::raw("uit  "),
        Span::styled("[t]", key),
        Span::raw("heme  "),
        Span::styled("[j/k]", key),
        Span::raw(" scroll  "),
        Span::styled("[1-5]", key),
        Span::raw(" jump  "),
        Span::styled("[Tab]", key),
        Span::raw(" select  "),
        Span::styled("[Enter]", key),
        Span::raw(" open  "),
    ];

    let used: usize = spans.iter().map(|s| s.width()).sum();
    if let Some(entry) = state.logs.back() {
        let msg = format!("{} {}", entry.time, entry.message);
        let room = (area.width as usize).saturating_sub(used + 2);
        spans.push(Span::styled(
            truncate_with_ellipsis(&msg, room).into_owned(),
            Style::default().fg(palette.muted),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_menu(f: &mut Frame, view: &ViewState, body: Rect, palette: &Palette) {
    let width = MENU_WIDTH.min(body.width);
    let height = (Section::ALL.len() as u16 + 2).min(body.height);
    let area = Rect::new(body.x + body.width - width, body.y, width, height);

    let items: Vec<ListItem> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| ListItem::new(format!("{} {}", i + 1, s.label())))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.accent))
                .title(" Menu "),
        )
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .highlight_style(Style::default().fg(palette.bg).bg(palette.accent))
        .highlight_symbol("› ");
    let mut list_state = ListState::default().with_selected(Some(view.menu_index));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Render the whole page off-screen, then copy the scrolled slice in.
fn draw_page(
    f: &mut Frame,
    state: &AppState,
    view: &ViewState,
    layout: &PageLayout,
    area: Rect,
    now: Instant,
    palette: &Palette,
) {
    let mut page = Buffer::empty(Rect::new(0, 0, layout.width, layout.height));
    page.set_style(page.area, Style::default().fg(palette.fg).bg(palette.bg));

    for (section, rect) in &layout.sections {
        match section {
            Section::About => draw_hero(&mut page, state, *rect, palette),
            Section::Contributions => draw_graph(&mut page, state, *rect, now, palette),
            Section::Projects => draw_projects(&mut page, state, view, layout, *rect, now, palette),
            Section::Skills => draw_skills(&mut page, state, view, layout, *rect, now, palette),
            Section::Contact => draw_contacts(&mut page, state, view, layout, *rect, now, palette),
        }
    }

    let buf = f.buffer_mut();
    for row in 0..area.height {
        let page_y = view.scroll + row;
        if page_y >= layout.height {
            break;
        }
        for col in 0..area.width.min(layout.width) {
            if let (Some(src), Some(dst)) = (page.cell((col, page_y)), buf.cell_mut((area.x + col, area.y + row))) {
                *dst = src.clone();
            }
        }
    }
}

fn section_block<'a>(title: String, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(Span::styled(title, Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)))
}

fn draw_hero(page: &mut Buffer, state: &AppState, area: Rect, palette: &Palette) {
    let block = section_block(" About ".to_string(), palette);
    let inner = block.inner(area);
    block.render(area, page);

    let cursor_on = (state.start_time.elapsed().as_millis() / 500) % 2 == 0;
    let cursor = if cursor_on { "▌" } else { " " };
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {}", state.profile.name),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  @{}", state.profile.handle), Style::default().fg(palette.muted)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  > ", Style::default().fg(palette.muted)),
            Span::styled(state.hero_text.clone(), Style::default().fg(palette.fg)),
            Span::styled(cursor, Style::default().fg(palette.accent)),
        ]),
    ];
    Paragraph::new(lines).render(inner, page);
}

fn draw_graph(page: &mut Buffer, state: &AppState, area: Rect, now: Instant, palette: &Palette) {
    let graph = &state.graph;
    let block = section_block(" Contributions ".to_string(), palette);
    let inner = block.inner(area);
    block.render(area, page);

    // Newest weeks win when the terminal is too narrow for all 52.
    let weeks_fit = ((inner.width / 2) as usize).min(WEEKS);
    let first_week = WEEKS - weeks_fit;
    let visible = graph.visible_cells(now.saturating_duration_since(state.graph_shown_at).as_millis());

    let mut month_row = String::new();
    for label in &graph.months {
        let start = label.week.max(first_week);
        let end = (label.week + label.span_weeks).min(WEEKS);
        if end <= start {
            continue;
        }
        let width = (end - start) * 2;
        let name = if width >= label.name.len() + 1 { label.name } else { "" };
        month_row.push_str(&format!("{:<width$}", name, width = width));
    }

    let mut lines = vec![Line::from(Span::styled(month_row, Style::default().fg(palette.muted)))];
    for day in 0..DAYS_PER_WEEK {
        let spans: Vec<Span> = (first_week..WEEKS)
            .map(|week| {
                let index = week * DAYS_PER_WEEK + day;
                match graph.cell(week, day) {
                    Some(cell) if index < visible => {
                        Span::styled("■ ", Style::default().fg(palette.level(cell.level)))
                    }
                    _ => Span::raw("  "),
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let latest = graph.days.last().map(|d| d.tooltip()).unwrap_or_default();
    lines.push(Line::from(Span::styled(latest, Style::default().fg(palette.muted))));

    let mut legend = vec![
        Span::styled(graph.total_label(), Style::default().fg(palette.fg).add_modifier(Modifier::BOLD)),
        Span::styled("   Less ", Style::default().fg(palette.muted)),
    ];
    for level in 0..=4u8 {
        legend.push(Span::styled("■ ", Style::default().fg(palette.level(level))));
    }
    legend.push(Span::styled("More", Style::default().fg(palette.muted)));
    lines.push(Line::from(legend));

    Paragraph::new(lines).render(inner, page);
}

/// `None` while the element is still hidden, `Some(true)` while it fades in.
fn reveal_gate(view: &ViewState, placement: &Placement, now: Instant) -> Option<bool> {
    match view.reveal.phase(&placement.id, now) {
        RevealPhase::Hidden => None,
        RevealPhase::Fading => Some(true),
        RevealPhase::Shown => Some(false),
    }
}

fn dim(page: &mut Buffer, area: Rect) {
    page.set_style(area, Style::default().add_modifier(Modifier::DIM));
}

fn draw_projects(
    page: &mut Buffer,
    state: &AppState,
    view: &ViewState,
    layout: &PageLayout,
    area: Rect,
    now: Instant,
    palette: &Palette,
) {
    let title = match state.project_source {
        Some(source) => format!(" Projects ({}) ", source.label()),
        None => " Projects ".to_string(),
    };
    let block = section_block(title, palette);
    let inner = block.inner(area);
    block.render(area, page);

    if !state.projects.is_rendered() {
        Paragraph::new(Span::styled("  Loading projects…", Style::default().fg(palette.muted)))
            .render(inner, page);
        return;
    }

    let generation = state.projects.generation();
    for (index, card) in state.projects.cards().iter().enumerate() {
        let Some(placement) = layout.placement(ElementId::Project { generation, index }) else {
            continue;
        };
        let Some(fading) = reveal_gate(view, placement, now) else {
            continue;
        };

        let selected = view.selected_card == Some(index);
        let border = if selected {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.border)
        };
        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(
                format!(" {} ", card.name),
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ))
            .title_top(
                Line::from(Span::styled(" Public ", Style::default().fg(palette.muted)))
                    .alignment(Alignment::Right),
            );
        let card_inner = card_block.inner(placement.area);
        card_block.render(placement.area, page);

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(card_inner);
        Paragraph::new(card.description.as_str())
            .style(Style::default().fg(palette.muted))
            .wrap(Wrap { trim: true })
            .render(rows[0], page);

        let footer = Line::from(vec![
            Span::styled("● ", Style::default().fg(lang_color(&card.lang_key))),
            Span::styled(format!("{}   ", card.language), Style::default().fg(palette.fg)),
            Span::styled(format!("★ {}   ", card.stars), Style::default().fg(palette.muted)),
            Span::styled(format!("⑂ {}", card.forks), Style::default().fg(palette.muted)),
        ]);
        Paragraph::new(footer).render(rows[1], page);

        if fading {
            dim(page, placement.area);
        }
    }
}

fn draw_skills(
    page: &mut Buffer,
    state: &AppState,
    view: &ViewState,
    layout: &PageLayout,
    area: Rect,
    now: Instant,
    palette: &Palette,
) {
    section_block(" Skills ".to_string(), palette).render(area, page);

    for (i, skill) in state.profile.skills.iter().enumerate() {
        let Some(placement) = layout.placement(ElementId::Skill(i)) else {
            continue;
        };
        let Some(fading) = reveal_gate(view, placement, now) else {
            continue;
        };
        Paragraph::new(skill.as_str())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.border)),
            )
            .style(Style::default().fg(palette.fg))
            .render(placement.area, page);
        if fading {
            dim(page, placement.area);
        }
    }
}

fn draw_contacts(
    page: &mut Buffer,
    state: &AppState,
    view: &ViewState,
    layout: &PageLayout,
    area: Rect,
    now: Instant,
    palette: &Palette,
) {
    section_block(" Contact ".to_string(), palette).render(area, page);

    for (i, contact) in state.profile.contacts.iter().enumerate() {
        let Some(placement) = layout.placement(ElementId::Contact(i)) else {
            continue;
        };
        let Some(fading) = reveal_gate(view, placement, now) else {
            continue;
        };
        let width = placement.area.width.saturating_sub(2) as usize;
        let lines = vec![
            Line::from(Span::styled(contact.value.clone(), Style::default().fg(palette.fg))),
            Line::from(Span::styled(
                truncate_with_ellipsis(&contact.url, width).into_owned(),
                Style::default().fg(palette.muted),
            )),
        ];
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.border))
                    .title(Span::styled(
                        format!(" {} ", contact.label),
                        Style::default().fg(palette.accent),
                    )),
            )
            .render(placement.area, page);
        if fading {
            dim(page, placement.area);
        }
    }
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    if s.chars().count() <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }
    let truncated: String = s.chars().take(max_width - 1).collect();
    Cow::Owned(format!("{}…", truncated))
}
