//! Bounded command history with newest-first recall.

use crate::terminal::settings::MAX_HISTORY;
use std::collections::VecDeque;

/// Submitted commands for one session plus the recall cursor.
///
/// The recall cursor counts back from the newest entry: `Some(0)` shows the
/// most recent command, `None` means a fresh line is being edited.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    limit: usize,
    recall: Option<usize>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_limit(MAX_HISTORY)
    }
}

impl CommandHistory {
    /// Empty history keeping at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            recall: None,
        }
    }

    /// Add a command, skipping blanks and an immediate repeat of the newest
    /// entry. Returns whether the entry was appended.
    pub fn push(&mut self, entry: &str) -> bool {
        if entry.trim().is_empty() {
            return false;
        }
        if self.entries.back().map(String::as_str) == Some(entry) {
            return false;
        }

        self.entries.push_back(entry.to_string());
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        true
    }

    /// Step to the next older entry and return it, or `None` at the oldest.
    pub fn recall_older(&mut self) -> Option<&str> {
        let next = self.recall.map_or(0, |idx| idx + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.recall = Some(next);
        self.entry_back(next)
    }

    /// Step to the next newer entry.
    ///
    /// Leaving the newest entry returns `Some("")` (a fresh empty line); when
    /// not recalling at all this is a no-op returning `None`.
    pub fn recall_newer(&mut self) -> Option<&str> {
        match self.recall? {
            0 => {
                self.recall = None;
                Some("")
            }
            idx => {
                self.recall = Some(idx - 1);
                self.entry_back(idx - 1)
            }
        }
    }

    /// Leave recall mode.
    pub fn reset_recall(&mut self) {
        self.recall = None;
    }

    /// Current recall position, newest-first.
    pub fn recall_index(&self) -> Option<usize> {
        self.recall
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entries oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    fn entry_back(&self, back: usize) -> Option<&str> {
        let idx = self.entries.len().checked_sub(back + 1)?;
        self.entries.get(idx).map(String::as_str)
    }
}
