//! Session History Store: append-only record of the responses shown in one session.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::consent::models::InteractionKind;

/// One successful completion. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionRecord {
    pub timestamp: DateTime<Utc>,
    pub kind: InteractionKind,
    pub response_text: String,
}

impl InteractionRecord {
    pub fn new(timestamp: DateTime<Utc>, kind: InteractionKind, response_text: String) -> Self {
        Self {
            timestamp,
            kind,
            response_text,
        }
    }

    /// Heading shown above the record in the history panel.
    pub fn title(&self) -> String {
        format!(
            "Response Generated on {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[derive(Debug, Default)]
pub struct SessionHistory {
    records: Vec<InteractionRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` and returns its index.
    /// Records with blank response text are dropped silently; returns `None` in that case.
    pub fn append(&mut self, record: InteractionRecord) -> Option<usize> {
        if record.response_text.trim().is_empty() {
            return None;
        }
        self.records.push(record);
        Some(self.records.len() - 1)
    }

    /// All records, oldest first.
    pub fn list_all(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&InteractionRecord> {
        self.records.get(index)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
