//! Events the card announces to its host
//!
//! Listeners are channels: `add_event_listener` hands back a receiver that
//! gets a clone of every matching event. Listeners registered on an ancestor
//! only see events configured to bubble.

use super::record::UserRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

/// Event names, as a host would listen for them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    UserLoaded,
    ErrorOccurred,
    CardClick,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserLoaded => "user-loaded",
            Self::ErrorOccurred => "error-occurred",
            Self::CardClick => "card-click",
        }
    }
}

/// Payload carried by an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventDetail {
    UserLoaded {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    ErrorOccurred {
        message: String,
    },
    None,
}

/// A dispatched event
#[derive(Debug, Clone, PartialEq)]
pub struct CardEvent {
    pub kind: EventKind,
    pub detail: EventDetail,
    /// Propagates to ancestors of the card
    pub bubbles: bool,
    /// Crosses the shadow boundary
    pub composed: bool,
    pub timestamp: DateTime<Utc>,
}

impl CardEvent {
    /// Successful load: `{id, name}`, bubbles and crosses the boundary
    pub fn user_loaded(record: &UserRecord) -> Self {
        Self {
            kind: EventKind::UserLoaded,
            detail: EventDetail::UserLoaded {
                id: record.id.clone(),
                name: record.name.clone(),
            },
            bubbles: true,
            composed: true,
            timestamp: Utc::now(),
        }
    }

    /// Failed load: `{message}`, seen by direct listeners only
    pub fn error_occurred(message: impl Into<String>) -> Self {
        Self {
            kind: EventKind::ErrorOccurred,
            detail: EventDetail::ErrorOccurred {
                message: message.into(),
            },
            bubbles: false,
            composed: false,
            timestamp: Utc::now(),
        }
    }

    /// Plain click notification
    pub fn card_click() -> Self {
        Self {
            kind: EventKind::CardClick,
            detail: EventDetail::None,
            bubbles: false,
            composed: false,
            timestamp: Utc::now(),
        }
    }

    /// Detail as JSON (`null` for plain events)
    pub fn detail_json(&self) -> Value {
        serde_json::to_value(&self.detail).unwrap_or(Value::Null)
    }
}

/// Where a listener is attached relative to the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerScope {
    /// On the card element itself
    Target,
    /// On an ancestor in the host page
    Ancestor,
}

struct Listener {
    kind: Option<EventKind>,
    scope: ListenerScope,
    tx: mpsc::UnboundedSender<CardEvent>,
}

impl Listener {
    fn accepts(&self, event: &CardEvent) -> bool {
        if self.kind.is_some_and(|kind| kind != event.kind) {
            return false;
        }
        match self.scope {
            ListenerScope::Target => true,
            ListenerScope::Ancestor => event.bubbles,
        }
    }
}

/// Fan-out of card events to registered listeners
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Listener>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(
        &mut self,
        kind: Option<EventKind>,
        scope: ListenerScope,
    ) -> mpsc::UnboundedReceiver<CardEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(Listener { kind, scope, tx });
        rx
    }

    /// Listen for one event kind on the card
    pub fn add_event_listener(&mut self, kind: EventKind) -> mpsc::UnboundedReceiver<CardEvent> {
        self.register(Some(kind), ListenerScope::Target)
    }

    /// Listen for every event on the card
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<CardEvent> {
        self.register(None, ListenerScope::Target)
    }

    /// Listen for one event kind on an ancestor of the card
    pub fn add_ancestor_listener(
        &mut self,
        kind: EventKind,
    ) -> mpsc::UnboundedReceiver<CardEvent> {
        self.register(Some(kind), ListenerScope::Ancestor)
    }

    /// Deliver an event, returning how many listeners received it
    ///
    /// Listeners whose receiver was dropped are removed.
    pub fn dispatch(&mut self, event: CardEvent) -> usize {
        self.listeners.retain(|l| !l.tx.is_closed());

        let mut delivered = 0;
        for listener in self.listeners.iter().filter(|l| l.accepts(&event)) {
            if listener.tx.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }

        tracing::debug!(
            "Dispatched {} to {} listener(s)",
            event.kind.name(),
            delivered
        );
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_loaded_detail_and_flags() {
        let record = UserRecord::new("Alice", "a@x.com").with_id(1);
        let event = CardEvent::user_loaded(&record);

        assert_eq!(event.kind.name(), "user-loaded");
        assert_eq!(event.detail_json(), json!({"id": 1, "name": "Alice"}));
        assert!(event.bubbles);
        assert!(event.composed);
    }

    #[test]
    fn test_user_loaded_from_empty_record_has_empty_detail() {
        let event = CardEvent::user_loaded(&UserRecord::default());
        assert_eq!(event.detail_json(), json!({}));
    }

    #[test]
    fn test_error_detail_does_not_bubble() {
        let event = CardEvent::error_occurred("API Down");
        assert_eq!(event.detail_json(), json!({"message": "API Down"}));
        assert!(!event.bubbles);
        assert!(!event.composed);
    }

    #[test]
    fn test_dispatch_filters_by_kind() {
        let mut dispatcher = EventDispatcher::new();
        let mut clicks = dispatcher.add_event_listener(EventKind::CardClick);
        let mut errors = dispatcher.add_event_listener(EventKind::ErrorOccurred);

        assert_eq!(dispatcher.dispatch(CardEvent::card_click()), 1);

        assert_eq!(clicks.try_recv().unwrap().kind, EventKind::CardClick);
        assert!(errors.try_recv().is_err());
    }

    #[test]
    fn test_ancestor_sees_only_bubbling_events() {
        let mut dispatcher = EventDispatcher::new();
        let mut loaded = dispatcher.add_ancestor_listener(EventKind::UserLoaded);
        let mut errors = dispatcher.add_ancestor_listener(EventKind::ErrorOccurred);

        dispatcher.dispatch(CardEvent::user_loaded(&UserRecord::new("A", "a@x.com")));
        dispatcher.dispatch(CardEvent::error_occurred("boom"));

        assert!(loaded.try_recv().is_ok());
        assert!(errors.try_recv().is_err());
    }

    #[test]
    fn test_dropped_listeners_are_pruned() {
        let mut dispatcher = EventDispatcher::new();
        let all = dispatcher.subscribe();
        let _kept = dispatcher.subscribe();
        drop(all);

        assert_eq!(dispatcher.dispatch(CardEvent::card_click()), 1);
        assert_eq!(dispatcher.listener_count(), 1);
    }
}
