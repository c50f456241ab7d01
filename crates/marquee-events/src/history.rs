//! Bounded record of recently published events, kept for debugging.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of entries kept in the event history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// A single published event as recorded in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Name the event was published under.
    pub event_name: String,
    /// Payload as published.
    pub data: Value,
    /// When the event was published.
    pub timestamp: DateTime<Utc>,
}

/// FIFO buffer that evicts the oldest entry once full.
#[derive(Debug)]
pub(crate) struct EventHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl EventHistory {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn record(&mut self, event_name: &str, data: &Value) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            event_name: event_name.to_string(),
            data: data.clone(),
            timestamp: Utc::now(),
        });
    }

    pub(crate) fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
