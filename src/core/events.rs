//! Events admin table state
//!
//! Rows are removed only once the backend confirms a delete. Each row tracks
//! its own in-flight delete so other rows stay usable.

use std::collections::HashSet;

use super::api::ApiError;
use super::models::{Event, EventId, visible_events};
use super::notification::Notification;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsTable {
    rows: Vec<Event>,
    deleting: HashSet<EventId>,
}

/// Result of a finished delete
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub notification: Notification,
    /// Whether the cached events list must be invalidated
    pub invalidate: bool,
}

impl EventsTable {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            rows: visible_events(events),
            deleting: HashSet::new(),
        }
    }

    pub fn rows(&self) -> &[Event] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace rows with a fresh fetch, keeping in-flight markers for rows
    /// that are still present
    pub fn replace(&mut self, events: Vec<Event>) {
        self.rows = visible_events(events);
        let present: HashSet<EventId> = self.rows.iter().map(|e| e.id).collect();
        self.deleting.retain(|id| present.contains(id));
    }

    /// Take the cached list when it is fresh. A stale list is ignored so rows
    /// removed locally stay removed until the refetch lands.
    pub fn sync(&mut self, fresh: Option<Vec<Event>>) -> bool {
        match fresh {
            Some(events) => {
                self.replace(events);
                true
            }
            None => false,
        }
    }

    pub fn is_deleting(&self, id: EventId) -> bool {
        self.deleting.contains(&id)
    }

    /// Mark a row as deleting. Returns false for unknown rows and rows that
    /// already have a delete in flight.
    pub fn begin_delete(&mut self, id: EventId) -> bool {
        if !self.rows.iter().any(|e| e.id == id) {
            return false;
        }
        self.deleting.insert(id)
    }

    /// Apply the backend's answer to a delete started with [`begin_delete`]
    ///
    /// [`begin_delete`]: EventsTable::begin_delete
    pub fn finish_delete(&mut self, id: EventId, result: &Result<(), ApiError>) -> DeleteOutcome {
        self.deleting.remove(&id);
        let title = self
            .rows
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.title.clone())
            .unwrap_or_else(|| format!("Event {}", id));

        match result {
            Ok(()) => {
                self.rows.retain(|e| e.id != id);
                DeleteOutcome {
                    notification: Notification::success(
                        "Event deleted",
                        format!("\"{}\" was removed", title),
                    ),
                    invalidate: true,
                }
            }
            Err(error) => DeleteOutcome {
                notification: Notification::from_api_error(
                    format!("Could not delete \"{}\"", title),
                    error,
                ),
                invalidate: false,
            },
        }
    }
}
