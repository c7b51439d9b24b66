//! Battle event log
//!
//! Append-only stream of typed events; the presentation layer consumes it
//! in emission order. Categories drive display styling only.

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Log entry for battle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleEvent {
    pub tick: Tick,
    pub message: String,
    pub category: LogCategory,
}

/// Display category of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    /// Battle flow and mode changes
    Normal,
    /// Damage dealt in either resource
    Damage,
    /// BREAK inflicted
    Break,
    /// Good news for the player (victory)
    Heal,
}

/// Append-only log of battle events
#[derive(Debug, Clone, Default)]
pub struct BattleEventLog {
    events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, message: String, category: LogCategory) {
        self.events.push(BattleEvent {
            tick,
            message,
            category,
        });
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Entries appended at or after `index`, for incremental consumption
    pub fn since(&self, index: usize) -> &[BattleEvent] {
        &self.events[index.min(self.events.len())..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_preserves_emission_order() {
        let mut log = BattleEventLog::new();
        log.push(1, "first".into(), LogCategory::Normal);
        log.push(1, "second".into(), LogCategory::Damage);
        log.push(2, "third".into(), LogCategory::Break);

        let messages: Vec<&str> = log.events().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
    }

    #[test]
    fn test_since_returns_new_entries_only() {
        let mut log = BattleEventLog::new();
        log.push(1, "a".into(), LogCategory::Normal);
        let cursor = log.len();
        log.push(2, "b".into(), LogCategory::Heal);

        let fresh = log.since(cursor);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].message, "b");
        assert!(log.since(99).is_empty());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&LogCategory::Break).unwrap();
        assert_eq!(json, "\"break\"");
    }
}
