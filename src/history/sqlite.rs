use super::types::{ConversationStore, Message, PersistenceError};
use crate::entity::messages;
use async_trait::async_trait;
use sea_orm::*;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

const DB_FILE: &str = "history.db";

/// Chat history in a SQLite file. Rows are ordered by their autoincrement id;
/// `timestamp_us` is wall-clock time forced to be strictly increasing.
pub struct SqliteHistory {
    db_url: String,
    // Held for the whole insert: the single serialization point for appends.
    last_timestamp: Arc<Mutex<i64>>,
}

impl SqliteHistory {
    pub async fn new(data_dir: &Path) -> Result<Arc<Self>, PersistenceError> {
        tokio::fs::create_dir_all(data_dir).await?;
        let db_path = data_dir.join(DB_FILE);
        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let (last_timestamp, rows) = tokio::task::spawn_blocking({
            let db_url = db_url.clone();
            move || -> Result<(i64, u64), PersistenceError> {
                let db = Database::connect(&db_url)?;

                // Only creates what is missing; existing rows are kept.
                db.get_schema_builder()
                    .register(messages::Entity)
                    .sync(&db)?;

                let last = messages::Entity::find()
                    .order_by_desc(messages::Column::Id)
                    .one(&db)?
                    .map(|m| m.timestamp_us)
                    .unwrap_or(0);
                let rows = messages::Entity::find().count(&db)?;
                Ok((last, rows))
            }
        })
        .await??;

        info!("History store ready at {} ({} messages)", db_path.display(), rows);

        Ok(Arc::new(Self {
            db_url,
            last_timestamp: Arc::new(Mutex::new(last_timestamp)),
        }))
    }
}

impl TryFrom<messages::Model> for Message {
    type Error = PersistenceError;

    fn try_from(r: messages::Model) -> Result<Self, Self::Error> {
        let id = r.id;
        let corrupt = |reason: String| PersistenceError::Corrupt { id, reason };

        let sender = r.sender.parse().map_err(corrupt)?;
        let sentiment = match r.sentiment.as_deref() {
            Some(s) => Some(s.parse().map_err(corrupt)?),
            None => None,
        };

        Ok(Self {
            sender,
            text: r.text,
            sentiment,
        })
    }
}

#[async_trait]
impl ConversationStore for SqliteHistory {
    async fn append(&self, message: &Message) -> Result<(), PersistenceError> {
        let db_url = self.db_url.clone();
        let last_timestamp = self.last_timestamp.clone();
        let message = message.clone();

        tokio::task::spawn_blocking(move || -> Result<(), PersistenceError> {
            let mut last = last_timestamp
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let now = Ord::max(chrono::Utc::now().timestamp_micros(), *last + 1);

            let record = messages::ActiveModel {
                id: NotSet,
                sender: Set(message.sender.as_str().to_string()),
                text: Set(message.text),
                sentiment: Set(message.sentiment.map(|s| s.as_str().to_string())),
                timestamp_us: Set(now),
            };

            let db = Database::connect(&db_url)?;
            messages::Entity::insert(record).exec(&db)?;
            *last = now;
            Ok(())
        })
        .await?
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Message>, PersistenceError> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let db_url = self.db_url.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<Message>, PersistenceError> {
            let db = Database::connect(&db_url)?;
            let rows = messages::Entity::find()
                .order_by_desc(messages::Column::Id)
                .limit(limit as u64)
                .all(&db)?;

            let mut out = rows
                .into_iter()
                .map(Message::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            out.reverse();
            Ok(out)
        })
        .await?
    }
}
