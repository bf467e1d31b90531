use crate::domain::loan::LoanSummary;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Most-recent-first list of past calculations with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    capacity: usize,
    entries: VecDeque<LoanSummary>,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Records a calculation, evicting the oldest when full.
    pub fn push(&mut self, summary: LoanSummary) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(summary);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&LoanSummary> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoanSummary> {
        self.entries.iter()
    }
}
