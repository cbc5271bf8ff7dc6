//! Ephemeral message tracking for the profile wizard.
//!
//! Ids of the questions the bot asks and the replies the user types are collected while the
//! wizard runs, then deleted in one pass when it finishes or is abandoned.

use dbot_core::MessageId;
use serde::{Deserialize, Serialize};

use crate::effect::Effect;

/// Ordered, duplicate-free list of message ids awaiting cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMessages {
    ids: Vec<MessageId>,
}

impl PendingMessages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the id. Returns false if it was already tracked.
    pub fn track(&mut self, id: MessageId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[MessageId] {
        &self.ids
    }

    /// Drains every id into a delete effect, oldest first.
    pub fn flush(&mut self, chat_id: i64) -> Vec<Effect> {
        self.ids
            .drain(..)
            .map(|message_id| Effect::DeleteMessage {
                chat_id,
                message_id,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_ignores_duplicates() {
        let mut pending = PendingMessages::new();
        assert!(pending.track(10));
        assert!(pending.track(11));
        assert!(!pending.track(10));
        assert_eq!(pending.ids(), &[10, 11]);
        assert!(pending.contains(11));
        assert!(!pending.contains(12));
    }

    #[test]
    fn test_flush_drains_oldest_first() {
        let mut pending = PendingMessages::new();
        for id in [5, 3, 9] {
            pending.track(id);
        }

        let effects = pending.flush(77);

        assert!(pending.is_empty());
        assert_eq!(
            effects,
            vec![
                Effect::DeleteMessage { chat_id: 77, message_id: 5 },
                Effect::DeleteMessage { chat_id: 77, message_id: 3 },
                Effect::DeleteMessage { chat_id: 77, message_id: 9 },
            ]
        );
        assert!(pending.flush(77).is_empty());
    }
}
