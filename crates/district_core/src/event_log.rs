//! Capped, most-recent-first message feed for the presentation layer.

use std::collections::VecDeque;

use crate::{EventLog, LogEntry, Severity};

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a message, dropping the oldest once over capacity.
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.entries.push_front(LogEntry {
            message: message.into(),
            severity,
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_capped() {
        let mut log = EventLog::new(10);
        for i in 0..15 {
            log.push(format!("msg {i}"), Severity::Info);
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.latest().map(|e| e.message.as_str()), Some("msg 14"));
        assert_eq!(log.entries().last().map(|e| e.message.as_str()), Some("msg 5"));
    }

    #[test]
    fn keeps_severity() {
        let mut log = EventLog::new(3);
        log.push("Not enough CROWN!", Severity::Danger);
        assert_eq!(log.latest().map(|e| e.severity), Some(Severity::Danger));
    }
}
