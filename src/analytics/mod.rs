//! Bounded, persisted log of user and system interactions.
//!
//! The log lives in memory newest-first and is written through to the
//! key-value store after every mutation. Storage problems are logged and
//! never surface to the caller: instrumentation must not break control flow.

pub mod event;
pub mod summary;

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::{keys, SharedStore};

pub use event::{names, AnalyticsEvent};
pub use summary::EventSummary;

/// Default number of events retained.
pub const MAX_EVENTS: usize = 100;

pub struct EventLog {
    store: SharedStore,
    events: Mutex<VecDeque<AnalyticsEvent>>,
    user_id: OnceLock<String>,
    max_events: usize,
}

impl EventLog {
    /// Creates the log and hydrates it from the store.
    pub fn new(store: SharedStore) -> Self {
        Self::with_capacity(store, MAX_EVENTS)
    }

    pub fn with_capacity(store: SharedStore, max_events: usize) -> Self {
        let max_events = max_events.max(1);
        let events = load_events(&store, max_events);
        Self {
            store,
            events: Mutex::new(events),
            user_id: OnceLock::new(),
            max_events,
        }
    }

    /// Records an interaction and returns the stored event.
    pub fn record(&self, name: &str, payload: Value) -> AnalyticsEvent {
        let user_id = self.user_id().to_string();
        let mut events = self.lock();

        // Keep newest-first ordering even if the wall clock steps backwards.
        let now = Utc::now();
        let timestamp = match events.front() {
            Some(newest) if newest.timestamp > now => newest.timestamp,
            _ => now,
        };

        let event = AnalyticsEvent {
            id: format!("evt_{}", Uuid::new_v4().simple()),
            name: name.to_string(),
            payload: event::into_payload(payload),
            timestamp,
            user_id,
        };

        events.push_front(event.clone());
        events.truncate(self.max_events);
        self.persist(&events);

        debug!(
            "[Analytics] Event recorded: {} {}",
            event.name,
            Value::Object(event.payload.clone())
        );
        event
    }

    /// Records an interaction without payload.
    pub fn track(&self, name: &str) -> AnalyticsEvent {
        self.record(name, Value::Null)
    }

    /// The most recent `limit` events (all when `None`), newest first.
    pub fn list(&self, limit: Option<usize>) -> Vec<AnalyticsEvent> {
        let events = self.lock();
        let take = limit.unwrap_or(events.len());
        events.iter().take(take).cloned().collect()
    }

    pub fn list_by_name(&self, name: &str) -> Vec<AnalyticsEvent> {
        self.lock()
            .iter()
            .filter(|event| event.name == name)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        let mut events = self.lock();
        events.clear();
        self.persist(&events);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_events
    }

    /// Stable pseudo-identifier for this installation, created on first use.
    pub fn user_id(&self) -> &str {
        self.user_id.get_or_init(|| resolve_user_id(&self.store))
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<AnalyticsEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, events: &VecDeque<AnalyticsEvent>) {
        let serialized = match serde_json::to_string(events) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("[Analytics] Failed to serialize events: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(keys::ANALYTICS_EVENTS, &serialized) {
            warn!("[Analytics] Failed to save events: {}", e);
        }
    }
}

fn load_events(store: &SharedStore, max_events: usize) -> VecDeque<AnalyticsEvent> {
    let raw = match store.get(keys::ANALYTICS_EVENTS) {
        Ok(Some(raw)) => raw,
        Ok(None) => return VecDeque::new(),
        Err(e) => {
            warn!("[Analytics] Failed to load events: {}", e);
            return VecDeque::new();
        }
    };
    match serde_json::from_str::<VecDeque<AnalyticsEvent>>(&raw) {
        Ok(mut events) => {
            events.truncate(max_events);
            events
        }
        Err(e) => {
            warn!("[Analytics] Discarding unreadable event log: {}", e);
            VecDeque::new()
        }
    }
}

fn resolve_user_id(store: &SharedStore) -> String {
    match store.get(keys::ANALYTICS_USER_ID) {
        Ok(Some(existing)) if !existing.is_empty() => return existing,
        Ok(_) => {}
        Err(e) => warn!("[Analytics] Failed to read user id: {}", e),
    }
    let user_id = format!("user_{}", Uuid::new_v4().simple());
    if let Err(e) = store.set(keys::ANALYTICS_USER_ID, &user_id) {
        warn!("[Analytics] Failed to save user id: {}", e);
    }
    user_id
}
