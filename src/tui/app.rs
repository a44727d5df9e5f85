// Terminal host state
//
// The host page for one mounted card: the card itself, the events it has
// announced, the id being typed, and view toggles.

use crate::card::{CardEvent, ClickTarget, CustomElement, UserCard, ATTR_USER_ID};
use crate::logging::LogBuffer;
use std::time::Instant;
use tokio::sync::mpsc;

/// Maximum number of card events kept for display
const MAX_EVENTS: usize = 200;

/// Whether keystrokes go to commands or to the id prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    EditingId,
}

/// Host application state
pub struct App {
    /// The mounted card
    pub card: UserCard,

    /// Events received from the card, oldest first
    pub events: Vec<CardEvent>,

    card_events: mpsc::UnboundedReceiver<CardEvent>,

    /// Log buffer for the system logs panel
    pub log_buffer: LogBuffer,

    pub input_mode: InputMode,

    /// Text typed at the id prompt
    pub id_input: String,

    /// Show raw shadow-root markup instead of the card view
    pub show_markup: bool,

    pub should_quit: bool,

    /// When the host started (for uptime display)
    pub start_time: Instant,

    /// Animation frame counter for the loading spinner
    pub animation_frame: usize,
}

impl App {
    /// Mount the card and subscribe to everything it announces
    pub fn new(mut card: UserCard, log_buffer: LogBuffer) -> Self {
        let card_events = card.subscribe();
        card.connected_callback();

        Self {
            card,
            events: Vec::new(),
            card_events,
            log_buffer,
            input_mode: InputMode::default(),
            id_input: String::new(),
            show_markup: false,
            should_quit: false,
            start_time: Instant::now(),
            animation_frame: 0,
        }
    }

    /// Move events announced by the card into the display list
    pub fn drain_card_events(&mut self) -> usize {
        let mut received = 0;
        while let Ok(event) = self.card_events.try_recv() {
            self.events.push(event);
            received += 1;
        }
        if self.events.len() > MAX_EVENTS {
            let excess = self.events.len() - MAX_EVENTS;
            self.events.drain(..excess);
        }
        received
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Spinner character for the current frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Open the id prompt, prefilled with the current id
    pub fn start_editing_id(&mut self) {
        self.id_input = self.card.user_id().unwrap_or_default().to_string();
        self.input_mode = InputMode::EditingId;
    }

    pub fn cancel_editing_id(&mut self) {
        self.id_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Apply the typed id to the card
    ///
    /// An empty id clears the card instead of setting an empty attribute.
    pub fn submit_id(&mut self) {
        let id = self.id_input.trim().to_string();
        self.id_input.clear();
        self.input_mode = InputMode::Normal;

        if id.is_empty() {
            self.card.clear_data();
        } else {
            self.card.set_attribute(ATTR_USER_ID, id);
        }
    }

    pub fn toggle_markup(&mut self) {
        self.show_markup = !self.show_markup;
    }

    pub fn click_card(&mut self) {
        self.card.click(ClickTarget::Card);
    }

    pub fn click_refresh(&mut self) {
        self.card.click(ClickTarget::RefreshButton);
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }

    /// Short label for the card's lifecycle state
    pub fn status_label(&self) -> &'static str {
        match self.card.lifecycle() {
            crate::card::LifecycleState::Idle => "idle",
            crate::card::LifecycleState::Loading => "loading",
            crate::card::LifecycleState::Loaded => "loaded",
        }
    }
}
