use crate::engine::ResponseEngine;
use crate::faq::FaqStore;
use crate::history::{ConversationStore, Message, PersistenceError, Sender};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

const EVENT_BUFFER: usize = 128;

#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// Messages ready to show, whether or not they were stored.
    User(Message),
    Bot(Message),
    PersistFailed { message: Message, error: String },
}

impl ChatEvent {
    fn shown(message: Message) -> Self {
        match message.sender {
            Sender::User => ChatEvent::User(message),
            Sender::Bot => ChatEvent::Bot(message),
        }
    }
}

/// Glue between a front end, the response engine, and the history store.
///
/// Each submitted line is stored as a user message, answered on a blocking
/// worker, and the reply is stored in turn. Everything to display comes back
/// on the event channel returned by [`ChatSession::new`].
pub struct ChatSession {
    engine: Arc<ResponseEngine>,
    history: Arc<dyn ConversationStore>,
    tx: mpsc::Sender<ChatEvent>,
}

impl ChatSession {
    pub fn new(
        engine: Arc<ResponseEngine>,
        history: Arc<dyn ConversationStore>,
    ) -> (Self, mpsc::Receiver<ChatEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        (
            Self {
                engine,
                history,
                tx,
            },
            rx,
        )
    }

    pub fn faq(&self) -> &Arc<FaqStore> {
        self.engine.faq()
    }

    pub async fn history(&self, limit: i64) -> Result<Vec<Message>, PersistenceError> {
        self.history.recent(limit).await
    }

    /// Returns `None` for blank input. Otherwise the user message has already
    /// been stored and emitted, and the handle resolves once the reply has.
    pub async fn submit(&self, text: &str) -> Option<JoinHandle<()>> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        // Sentiment is known before the first write so the stored user row
        // is never missing it.
        let sentiment = self.engine.analyze(text);
        record(
            self.history.as_ref(),
            &self.tx,
            Message::user(text, Some(sentiment)),
        )
        .await;

        let engine = self.engine.clone();
        let history = self.history.clone();
        let tx = self.tx.clone();
        let text = text.to_string();

        Some(tokio::spawn(async move {
            match tokio::task::spawn_blocking(move || engine.respond(&text)).await {
                Ok(response) => {
                    debug!("Reply ready ({})", response.sentiment);
                    let bot = Message::bot(response.text, response.sentiment);
                    record(history.as_ref(), &tx, bot).await;
                }
                Err(e) => error!("Response worker failed: {}", e),
            }
        }))
    }
}

async fn record(history: &dyn ConversationStore, tx: &mpsc::Sender<ChatEvent>, message: Message) {
    let failure = match history.append(&message).await {
        Ok(()) => None,
        Err(e) => {
            error!("Failed to persist {} message: {}", message.sender, e);
            Some(ChatEvent::PersistFailed {
                message: message.clone(),
                error: e.to_string(),
            })
        }
    };

    if tx.send(ChatEvent::shown(message)).await.is_err() {
        debug!("Chat event receiver dropped");
        return;
    }
    if let Some(event) = failure {
        let _ = tx.send(event).await;
    }
}
