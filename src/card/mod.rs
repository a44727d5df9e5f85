//! The `user-card` element
//!
//! `UserCard` is the lifecycle controller: it reacts to attribute changes,
//! starts fetches, applies their results and re-renders into its shadow root.
//!
//! # Threading
//!
//! A card is owned by one task. Each fetch runs as its own tokio task and
//! posts a `CardMessage::FetchSettled` back to the card's mailbox; state is
//! only changed when the owner drains the mailbox (`process_pending`,
//! `settle_next`, `run_until_idle`, or `handle_message` from a select loop).
//!
//! ```text
//!  set_attribute("user-id", "1")
//!        │  loading = true, render
//!        ▼
//!  tokio::spawn(api.fetch_user("1")) ──► mailbox ──► handle_message
//!                                                    │  record, events,
//!                                                    ▼  loading = false
//!                                                  render
//! ```
//!
//! Fetches are never cancelled. With the default `StalePolicy::Overwrite`
//! every settlement is applied, so a superseded fetch that settles last
//! overwrites a newer one.

mod element;
mod events;
mod record;
mod render;
mod shadow;
mod state;

#[cfg(test)]
pub(crate) mod mock;

pub use element::{AttributeChange, Attributes, CustomElement};
pub use events::{CardEvent, EventDetail, EventDispatcher, EventKind};
pub use record::UserRecord;
pub use render::{render_card, LOADING_TEXT, PLACEHOLDER_TEXT};
pub use shadow::ShadowRoot;
pub use state::{CardState, LifecycleState, StalePolicy, Theme};

use crate::api::{FetchError, UserApi};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identifier attribute: selects the record to fetch
pub const ATTR_USER_ID: &str = "user-id";

/// Theme attribute: "dark" or "light"
pub const ATTR_THEME: &str = "theme";

/// Messages posted back to the card by its fetch tasks
#[derive(Debug)]
pub enum CardMessage {
    FetchSettled {
        /// Sequence number assigned when the fetch started
        seq: u64,
        id: String,
        result: Result<UserRecord, FetchError>,
    },
}

/// Where inside the card a click landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Anywhere in the card that is not a control
    Card,
    /// The `#refresh-btn` button
    RefreshButton,
}

/// The user card element
pub struct UserCard {
    api: Arc<dyn UserApi>,
    attributes: Attributes,
    state: CardState,
    shadow_root: ShadowRoot,
    events: EventDispatcher,
    mailbox_tx: mpsc::UnboundedSender<CardMessage>,
    mailbox_rx: mpsc::UnboundedReceiver<CardMessage>,
    stale_policy: StalePolicy,
    /// Fetches started but not yet applied
    in_flight: usize,
    /// Sequence number of the most recently started fetch
    latest_seq: u64,
    connected: bool,
    render_count: u64,
}

impl UserCard {
    /// Create a detached card using the given lookup API
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        let (mailbox_tx, mailbox_rx) = mpsc::unbounded_channel();

        Self {
            api,
            attributes: Attributes::default(),
            state: CardState::default(),
            shadow_root: ShadowRoot::new(),
            events: EventDispatcher::new(),
            mailbox_tx,
            mailbox_rx,
            stale_policy: StalePolicy::default(),
            in_flight: 0,
            latest_seq: 0,
            connected: false,
            render_count: 0,
        }
    }

    /// Choose how superseded fetches are handled
    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // State
    // ─────────────────────────────────────────────────────────────────────

    /// Current record
    pub fn user(&self) -> Option<&UserRecord> {
        self.state.user()
    }

    /// Replace the current record and re-render
    pub fn set_user(&mut self, user: Option<UserRecord>) {
        self.state.set_user(user);
        self.render();
    }

    /// Whether a fetch is in flight
    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.state.lifecycle()
    }

    /// Theme as displayed (absent attribute displays as light)
    pub fn theme(&self) -> Theme {
        Theme::from_attribute(self.get_attribute(ATTR_THEME))
    }

    pub fn user_id(&self) -> Option<&str> {
        self.get_attribute(ATTR_USER_ID)
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Fetches started but not yet applied
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn shadow_root(&self) -> &ShadowRoot {
        &self.shadow_root
    }

    /// Number of times the card has rendered
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    // ─────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains(name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Set an attribute, notifying the lifecycle hook for observed names
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let change = self.attributes.set(name, value);
        self.notify_attribute_change(change);
    }

    /// Remove an attribute, notifying the lifecycle hook if it was present
    pub fn remove_attribute(&mut self, name: &str) {
        if let Some(change) = self.attributes.remove(name) {
            self.notify_attribute_change(change);
        }
    }

    fn notify_attribute_change(&mut self, change: AttributeChange) {
        if Self::observed_attributes().contains(&change.name.as_str()) {
            self.attribute_changed_callback(
                &change.name,
                change.old.as_deref(),
                change.new.as_deref(),
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Start fetching a user. Returns immediately; the result arrives
    /// through the mailbox.
    ///
    /// Must be called from within a tokio runtime.
    pub fn load_user_data(&mut self, id: &str) {
        self.latest_seq += 1;
        self.in_flight += 1;
        let seq = self.latest_seq;

        tracing::info!("Loading user {} via {} (fetch #{})", id, self.api.name(), seq);

        self.state.set_loading(true);
        self.render();

        let fetch = self.api.fetch_user(id);
        let tx = self.mailbox_tx.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            let result = fetch.await;
            // The card may have been dropped; nothing to report to then
            let _ = tx.send(CardMessage::FetchSettled { seq, id, result });
        });
    }

    /// Re-fetch the current `user-id`; returns false when none is set
    pub fn refresh(&mut self) -> bool {
        match self.user_id().filter(|id| !id.is_empty()).map(str::to_string) {
            Some(id) => {
                self.load_user_data(&id);
                true
            }
            None => {
                tracing::debug!("Refresh ignored: no user-id set");
                false
            }
        }
    }

    /// Discard the record and remove `user-id`
    pub fn clear_data(&mut self) {
        tracing::debug!("Clearing user data");
        self.state.set_user(None);
        self.remove_attribute(ATTR_USER_ID);
        self.render();
    }

    /// Flip the `theme` attribute between dark and light
    pub fn toggle_theme(&mut self) {
        let next = Theme::from_attribute(self.get_attribute(ATTR_THEME)).toggled();
        self.set_attribute(ATTR_THEME, next.as_str());
    }

    /// Simulate a click inside the rendered markup
    ///
    /// Clicks only reach the card once the delegated listener is installed
    /// by `connected_callback`.
    pub fn click(&mut self, target: ClickTarget) {
        if !self.shadow_root.has_click_listener() {
            tracing::debug!("Click on unconnected card ignored");
            return;
        }

        if target == ClickTarget::RefreshButton {
            self.refresh();
        }

        self.events.dispatch(CardEvent::card_click());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────

    /// Listen for one kind of event on the card
    pub fn add_event_listener(&mut self, kind: EventKind) -> mpsc::UnboundedReceiver<CardEvent> {
        self.events.add_event_listener(kind)
    }

    /// Listen for one kind of event from an ancestor of the card
    pub fn add_ancestor_listener(
        &mut self,
        kind: EventKind,
    ) -> mpsc::UnboundedReceiver<CardEvent> {
        self.events.add_ancestor_listener(kind)
    }

    /// Listen for every event on the card
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CardEvent> {
        self.events.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mailbox
    // ─────────────────────────────────────────────────────────────────────

    /// Wait for the next settled fetch
    ///
    /// Never resolves to `None` while the card is alive, since the card
    /// keeps a sender for its own fetch tasks.
    pub async fn next_message(&mut self) -> Option<CardMessage> {
        self.mailbox_rx.recv().await
    }

    /// Apply a settled fetch
    pub fn handle_message(&mut self, message: CardMessage) {
        match message {
            CardMessage::FetchSettled { seq, id, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);

                if self.stale_policy == StalePolicy::Discard && seq != self.latest_seq {
                    tracing::debug!(
                        "Discarding superseded fetch #{} for user {} (latest #{})",
                        seq,
                        id,
                        self.latest_seq
                    );
                    return;
                }

                self.apply_result(&id, result);
            }
        }
    }

    fn apply_result(&mut self, id: &str, result: Result<UserRecord, FetchError>) {
        match result {
            Ok(record) => {
                tracing::info!("Loaded user {} ({})", id, record.display_name());
                let event = CardEvent::user_loaded(&record);
                self.set_user(Some(record));
                self.events.dispatch(event);
            }
            Err(err) => {
                tracing::warn!("Failed to load user {}: {}", id, err);
                self.state.set_user(None);
                self.events.dispatch(CardEvent::error_occurred(err.message()));
            }
        }

        self.state.set_loading(false);
        self.render();
    }

    /// Apply every settled fetch already in the mailbox without waiting
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.mailbox_rx.try_recv() {
            self.handle_message(message);
            applied += 1;
        }
        applied
    }

    /// Wait for one in-flight fetch to settle and apply it
    ///
    /// Returns false immediately when nothing is in flight.
    pub async fn settle_next(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.mailbox_rx.recv().await {
            Some(message) => {
                self.handle_message(message);
                true
            }
            None => false,
        }
    }

    /// Wait until every started fetch has settled
    pub async fn run_until_idle(&mut self) {
        while self.settle_next().await {}
    }
}

impl CustomElement for UserCard {
    const TAG_NAME: &'static str = "user-card";

    fn observed_attributes() -> &'static [&'static str] {
        &[ATTR_USER_ID, ATTR_THEME]
    }

    fn attribute_changed_callback(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new {
            return;
        }

        tracing::debug!("Attribute {} changed: {:?} -> {:?}", name, old, new);

        if name == ATTR_USER_ID {
            if let Some(id) = new.filter(|id| !id.is_empty()) {
                self.load_user_data(id);
            }
        }
        self.render();
    }

    fn connected_callback(&mut self) {
        self.connected = true;
        self.render();
        if self.shadow_root.install_click_listener() {
            tracing::debug!("Card click listener installed");
        }
    }

    fn render(&mut self) {
        let html = render_card(self.state.user(), self.state.loading(), self.theme());
        self.shadow_root.set_inner_html(html);
        self.render_count += 1;
    }
}
