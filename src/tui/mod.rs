// TUI module - interactive host page
//
// Mounts one card in the terminal and drives it:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, animation ticks, settled fetches)
// - Rendering the card, its events and system logs

pub mod app;
pub mod theme;
pub mod ui;

use crate::api::HttpUserApi;
use crate::card::{UserCard, ATTR_THEME};
use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, InputMode};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Run the interactive host until the user quits
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let api = HttpUserApi::new(config.api_url.clone(), config.request_timeout())
        .context("Failed to create lookup client")?;
    let card = UserCard::new(Arc::new(api)).with_stale_policy(config.stale_responses);

    let mut app = App::new(card, log_buffer);
    app.card.set_attribute(ATTR_THEME, config.theme.as_str());

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Keyboard input is drained without blocking on every pass; the loop then
/// sleeps until either the animation tick fires or a fetch settles.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        while event::poll(Duration::ZERO).context("Failed to poll terminal")? {
            if let Event::Key(key_event) = event::read().context("Failed to read terminal")? {
                handle_key_event(app, key_event);
            }
        }

        if app.should_quit {
            break;
        }

        tokio::select! {
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(message) = app.card.next_message() => {
                app.card.handle_message(message);
            }
        }

        app.drain_card_events();
    }

    Ok(())
}

/// Handle keyboard input
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match app.input_mode {
        InputMode::EditingId => handle_editing_key(app, key_event),
        InputMode::Normal => handle_normal_key(app, key_event),
    }

    // Clicks and clears announce synchronously
    app.drain_card_events();
}

fn handle_normal_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Char('i') => app.start_editing_id(),
        KeyCode::Char('t') => app.card.toggle_theme(),
        KeyCode::Char('c') => app.card.clear_data(),
        KeyCode::Char('r') => app.click_refresh(),
        KeyCode::Enter | KeyCode::Char(' ') => app.click_card(),
        KeyCode::Char('m') => app.toggle_markup(),
        _ => {}
    }
}

fn handle_editing_key(app: &mut App, key_event: KeyEvent) {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Enter => app.submit_id(),
        KeyCode::Esc => app.cancel_editing_id(),
        KeyCode::Backspace => {
            app.id_input.pop();
        }
        KeyCode::Char(c) => app.id_input.push(c),
        _ => {}
    }
}
