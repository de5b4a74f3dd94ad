mod memory;
mod sqlite;
mod types;

use crate::config::Config;
use anyhow::Result;
pub use memory::MemoryHistory;
pub use sqlite::SqliteHistory;
use std::sync::Arc;
use tracing::info;
pub use types::{ConversationStore, Message, PersistenceError, Sender};

pub async fn create_history_store(config: &Config) -> Result<Arc<dyn ConversationStore>> {
    if config.persist {
        let store: Arc<dyn ConversationStore> = SqliteHistory::new(&config.data_dir).await?;
        Ok(store)
    } else {
        info!("Persistence disabled, keeping history in memory");
        Ok(Arc::new(MemoryHistory::new()))
    }
}
