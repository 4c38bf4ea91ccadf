//! Bounded, user-facing activity log
//!
//! Every entry is mirrored to `tracing` at the matching level. Messages are
//! stripped of angle brackets before they are stored so a log viewer can
//! render them as plain text.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Default number of entries kept
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 100;

/// Entry severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// One timestamped entry
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub level: ActivityLevel,
    pub message: String,
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.level,
            self.message
        )
    }
}

/// Ring of the most recent activity entries
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_CAPACITY)
    }
}

impl ActivityLog {
    /// Create a log keeping at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest when full
    pub fn push(&mut self, level: ActivityLevel, message: impl AsRef<str>) {
        let message = sanitize_message(message.as_ref());

        match level {
            ActivityLevel::Info | ActivityLevel::Success => {
                tracing::info!(level = %level, "{}", message)
            }
            ActivityLevel::Warning => tracing::warn!("{}", message),
            ActivityLevel::Error => tracing::error!("{}", message),
        }

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            timestamp: Local::now(),
            level,
            message,
        });
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.push(ActivityLevel::Info, message);
    }

    pub fn success(&mut self, message: impl AsRef<str>) {
        self.push(ActivityLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl AsRef<str>) {
        self.push(ActivityLevel::Warning, message);
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.push(ActivityLevel::Error, message);
    }

    /// Entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries at `level`
    pub fn count(&self, level: ActivityLevel) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Strip angle brackets from a user-facing message
pub fn sanitize_message(message: &str) -> String {
    message.chars().filter(|c| !matches!(c, '<' | '>')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_count() {
        let mut log = ActivityLog::default();
        log.info("Analyzing file");
        log.success("Done");
        log.warning("Only header row found");

        assert_eq!(log.len(), 3);
        assert_eq!(log.count(ActivityLevel::Warning), 1);
        assert_eq!(log.capacity(), DEFAULT_ACTIVITY_CAPACITY);
    }

    #[test]
    fn test_oldest_entries_are_evicted() {
        let mut log = ActivityLog::new(3);
        for i in 0..5 {
            log.info(format!("entry {i}"));
        }

        let messages: Vec<_> = log.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn test_angle_brackets_are_stripped() {
        let mut log = ActivityLog::default();
        log.error("<script>alert(1)</script>");

        let entry = log.entries().next().unwrap();
        assert_eq!(entry.message, "scriptalert(1)/script");
        assert!(entry.to_string().contains("ERROR: scriptalert(1)/script"));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = ActivityLog::new(0);
        log.info("a");
        log.info("b");
        assert_eq!(log.len(), 1);
    }
}
