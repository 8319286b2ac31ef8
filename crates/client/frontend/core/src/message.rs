//! Bounded notification log shared by both controllers and every frontend.
use std::collections::VecDeque;

use game_core::ErrorSeverity;

/// Severity level for notifications shown to the player.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl From<ErrorSeverity> for MessageLevel {
    fn from(severity: ErrorSeverity) -> Self {
        match severity {
            ErrorSeverity::Validation | ErrorSeverity::Recoverable => MessageLevel::Warning,
            ErrorSeverity::Fault | ErrorSeverity::Transport => MessageLevel::Error,
        }
    }
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    pub level: MessageLevel,
    /// Must stay on screen until acknowledged (remote faults, link loss).
    pub blocking: bool,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            level,
            blocking: false,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, MessageLevel::Info)
    }

    /// Entry for an error of the given class.
    pub fn for_error(text: impl Into<String>, severity: ErrorSeverity) -> Self {
        Self {
            text: text.into(),
            level: severity.into(),
            blocking: severity.is_blocking(),
        }
    }
}

/// Append-only circular buffer of notifications; the oldest entry is evicted
/// once `capacity` is exceeded.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn push_text(&mut self, message: impl Into<String>) {
        self.push(MessageEntry::info(message));
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

    pub fn last(&self) -> Option<&MessageEntry> {
        self.entries.back()
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }
}
