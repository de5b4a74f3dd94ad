use super::types::{ConversationStore, Message, PersistenceError};
use async_trait::async_trait;
use tokio::sync::Mutex;

struct Entry {
    timestamp_us: i64,
    message: Message,
}

/// Process-local history, used when persistence is turned off.
#[derive(Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<Entry>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for MemoryHistory {
    async fn append(&self, message: &Message) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().await;
        let now = chrono::Utc::now().timestamp_micros();
        let timestamp_us = match entries.last() {
            Some(last) => now.max(last.timestamp_us + 1),
            None => now,
        };
        entries.push(Entry {
            timestamp_us,
            message: message.clone(),
        });
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Message>, PersistenceError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let entries = self.entries.lock().await;
        let start = entries.len().saturating_sub(limit as usize);
        Ok(entries[start..].iter().map(|e| e.message.clone()).collect())
    }
}
