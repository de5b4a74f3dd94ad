use crate::lexicon::Sentiment;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "NeuralDesk",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("unknown sender: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub sentiment: Option<Sentiment>,
}

impl Message {
    pub fn user(text: impl Into<String>, sentiment: Option<Sentiment>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sentiment,
        }
    }

    pub fn bot(text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            sentiment: Some(sentiment),
        }
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("Storage worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt history row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

/// Append-only message log.
///
/// `append` calls are totally ordered; `recent(n)` returns the last `n`
/// appended messages oldest-first, and nothing for `n <= 0`.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn append(&self, message: &Message) -> Result<(), PersistenceError>;
    async fn recent(&self, limit: i64) -> Result<Vec<Message>, PersistenceError>;
}
