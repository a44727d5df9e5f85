// UI rendering logic
//
// Layout, top to bottom:
// - Title bar (3 lines)
// - Main area: card panel | events panel
// - System logs (6 lines)
// - Status bar (3 lines)

use super::app::{App, InputMode};
use super::theme::Palette;
use crate::card::{CardEvent, EventKind, LOADING_TEXT, PLACEHOLDER_TEXT};
use crate::logging::{LogEntry, LogLevel};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.card.theme());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(8),    // Card and events
            Constraint::Length(6), // System logs
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0], app, &palette);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    if app.show_markup {
        render_markup(f, main[0], app, &palette);
    } else {
        render_card(f, main[0], app, &palette);
    }
    render_events(f, main[1], app, &palette);
    render_logs_panel(f, chunks[2], app, &palette);
    render_status(f, chunks[3], app, &palette);
}

fn render_title(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let id = app.card.user_id().unwrap_or("-");
    let title = Line::from(vec![
        Span::styled(
            " <user-card> ",
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "user-id={}  theme={}  ",
            id,
            app.card.theme().as_str()
        )),
        Span::styled(app.status_label(), Style::default().fg(palette.muted)),
    ]);

    let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// The card as a host page would show it
fn render_card(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let card = &app.card;
    let text_style = Style::default().fg(palette.fg);
    let mut lines = Vec::new();

    if card.loading() {
        lines.push(Line::from(Span::styled(
            format!("{} {}", app.spinner_char(), LOADING_TEXT),
            Style::default().fg(palette.loader),
        )));
        lines.push(Line::default());
    }

    match card.user() {
        Some(user) => {
            lines.push(Line::from(Span::styled(
                user.display_name().to_string(),
                text_style.add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                user.display_email().to_string(),
                text_style,
            )));
        }
        None => lines.push(Line::from(Span::styled(
            PLACEHOLDER_TEXT,
            Style::default().fg(palette.muted),
        ))),
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "[ Refresh ]",
        Style::default()
            .fg(palette.button)
            .add_modifier(Modifier::BOLD),
    )));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(palette.bg))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(" Card "),
        );
    f.render_widget(paragraph, area);
}

/// Raw shadow-root markup
fn render_markup(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let paragraph = Paragraph::new(app.card.shadow_root().inner_html().to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title(format!(" Shadow root (render #{}) ", app.card.render_count())),
        );
    f.render_widget(paragraph, area);
}

fn render_events(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let height = area.height.saturating_sub(2) as usize;
    let skip = app.events.len().saturating_sub(height);

    let items: Vec<ListItem> = app
        .events
        .iter()
        .skip(skip)
        .map(|event| ListItem::new(format_event_line(event)).style(event_style(event, palette)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(format!(" Events ({}) ", app.events.len())),
    );
    f.render_widget(list, area);
}

/// Format a card event for the events panel
pub(crate) fn format_event_line(event: &CardEvent) -> String {
    let mut flags = String::new();
    if event.bubbles {
        flags.push_str(" bubbles");
    }
    if event.composed {
        flags.push_str(" composed");
    }

    let detail = event.detail_json();
    let detail = if detail.is_null() {
        String::new()
    } else {
        format!(" {}", detail)
    };

    format!(
        "[{}] {}{}{}",
        event.timestamp.format("%H:%M:%S"),
        event.kind.name(),
        detail,
        flags
    )
}

fn event_style(event: &CardEvent, palette: &Palette) -> Style {
    match event.kind {
        EventKind::UserLoaded => Style::default().fg(palette.user_loaded),
        EventKind::ErrorOccurred => Style::default()
            .fg(palette.error_occurred)
            .add_modifier(Modifier::BOLD),
        EventKind::CardClick => Style::default().fg(palette.card_click),
    }
}

fn render_logs_panel(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let height = area.height.saturating_sub(2) as usize;
    let log_entries = app.log_buffer.recent(height);

    let items: Vec<ListItem> = log_entries
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, palette)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" System Logs "),
    );
    f.render_widget(list, area);
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, palette: &Palette) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(palette.log_error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(palette.log_warn),
        LogLevel::Info => Style::default().fg(palette.log_info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(palette.log_debug),
    }
}

fn render_status(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let line = match app.input_mode {
        InputMode::EditingId => Line::from(vec![
            Span::styled(" user-id: ", Style::default().fg(palette.title)),
            Span::raw(app.id_input.as_str()),
            Span::styled("█", Style::default().fg(palette.muted)),
            Span::styled(
                "   Enter apply │ Esc cancel",
                Style::default().fg(palette.muted),
            ),
        ]),
        InputMode::Normal => Line::from(vec![
            Span::raw(format!(
                " {} │ in flight {} │ renders {} │ ",
                app.uptime(),
                app.card.in_flight(),
                app.card.render_count()
            )),
            Span::styled(
                "i id │ r refresh │ Enter click │ t theme │ c clear │ m markup │ q quit",
                Style::default().fg(palette.muted),
            ),
        ]),
    };

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
