mod chat;
mod config;
mod console;
mod engine;
mod entity;
mod faq;
mod history;
mod lexicon;

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::load()?;

    let faq_store = Arc::new(faq::FaqStore::with_entries(faq::defaults()));
    for entry in &config.faq_entries {
        faq_store.add(&entry.question, entry.answer.clone());
    }
    if let Some(path) = &config.trainer_file
        && let Err(e) = faq::train_from_file(&faq_store, path).await
    {
        warn!("Skipping trainer file: {:#}", e);
    }
    info!("FAQ store loaded ({} entries)", faq_store.len());

    let engine = Arc::new(engine::ResponseEngine::new(
        lexicon::Lexicon::default(),
        faq_store,
    ));
    let history = history::create_history_store(&config).await?;

    let (session, events) = chat::ChatSession::new(engine, history);
    let console = console::Console::new(session, config.history_preload);

    println!("NeuralDesk is ready. Type a message, or /help for commands.");

    tokio::select! {
        result = console.run(console::spawn_stdin_reader(), events) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    info!("Shutdown complete");
    Ok(())
}
