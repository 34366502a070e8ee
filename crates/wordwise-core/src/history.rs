use std::collections::VecDeque;
use std::time::SystemTime;

use serde::Serialize;
use wordwise_types::LookupResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HistoryRecord {
    Lookup(LookupResult),
    Translation {
        source_language: String,
        target_language: String,
        input_text: String,
        output_text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Stable identity for list rendering
    pub id: u64,
    pub created_at: SystemTime,
    pub record: HistoryRecord,
}

/// Bounded, most-recent-first log of completed lookups for this session
#[derive(Debug, Clone, Serialize)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    #[serde(skip)]
    next_id: u64,
}

impl HistoryStore {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Prepend `record`, dropping the oldest entries beyond capacity.
    pub fn record(&mut self, record: HistoryRecord, created_at: SystemTime) -> &HistoryEntry {
        self.next_id += 1;
        self.entries.push_front(HistoryEntry {
            id: self.next_id,
            created_at,
            record,
        });
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }
}
