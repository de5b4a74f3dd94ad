use crate::chat::{ChatEvent, ChatSession};
use crate::faq;
use crate::history::Message;
use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, warn};

const DEFAULT_HISTORY_LINES: i64 = 20;
const INPUT_BUFFER: usize = 16;

const HELP: &str = "Commands:\n\
  /faq             list known questions\n\
  /train <path>    load question,answer rows from a file\n\
  /history [n]     show the last n messages\n\
  /help            show this help\n\
  /quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Say(String),
    Faq,
    Train(PathBuf),
    History(i64),
    Help,
    Quit,
    Invalid(String),
    Empty,
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Input::Say(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name.to_lowercase().as_str() {
        "faq" => Input::Faq,
        "train" if arg.is_empty() => Input::Invalid("usage: /train <path>".to_string()),
        "train" => Input::Train(PathBuf::from(arg)),
        "history" if arg.is_empty() => Input::History(DEFAULT_HISTORY_LINES),
        "history" => match arg.parse() {
            Ok(n) => Input::History(n),
            Err(_) => Input::Invalid(format!("not a number: {}", arg)),
        },
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => Input::Invalid(format!("unknown command: /{}", name)),
    }
}

pub fn render(message: &Message) -> String {
    let mut out = format!("{}: {}", message.sender.display_name(), message.text);
    if let Some(sentiment) = message.sentiment {
        out.push_str(&format!("\n    Sentiment: {}", sentiment));
    }
    out
}

fn render_faqs(entries: &[faq::FaqEntry]) -> String {
    if entries.is_empty() {
        return "No FAQ entries.".to_string();
    }
    entries
        .iter()
        .map(|e| format!("FAQ: {} => {}", e.question, e.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads stdin on a plain thread so a pending read never holds up runtime
/// shutdown. The channel closes at end of input.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(INPUT_BUFFER);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

pub struct Console {
    session: ChatSession,
    preload: i64,
}

impl Console {
    pub fn new(session: ChatSession, preload: i64) -> Self {
        Self { session, preload }
    }

    pub async fn run(
        self,
        input: mpsc::Receiver<String>,
        events: mpsc::Receiver<ChatEvent>,
    ) -> Result<()> {
        self.run_with_output(input, events, std::io::stdout()).await
    }

    /// Chat events are written to `out`. Returns once input ends or `/quit`
    /// is read, after every pending reply has been stored and written.
    pub async fn run_with_output<W>(
        self,
        mut input: mpsc::Receiver<String>,
        mut events: mpsc::Receiver<ChatEvent>,
        mut out: W,
    ) -> Result<()>
    where
        W: Write + Send + 'static,
    {
        let Self { session, preload } = self;
        print_history(&session, preload).await;

        let printer = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let line = match event {
                    ChatEvent::User(m) | ChatEvent::Bot(m) => render(&m),
                    ChatEvent::PersistFailed { error, .. } => format!("    (not saved: {})", error),
                };
                if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                    error!("Failed to write chat output: {}", e);
                }
            }
        });

        let mut pending: Vec<JoinHandle<()>> = Vec::new();
        while let Some(line) = input.recv().await {
            pending.retain(|h| !h.is_finished());
            match parse_input(&line) {
                Input::Empty => {}
                Input::Say(text) => {
                    if let Some(handle) = session.submit(&text).await {
                        pending.push(handle);
                    }
                }
                Input::Faq => println!("{}", render_faqs(&session.faq().list())),
                Input::Train(path) => match faq::train_from_file(session.faq(), &path).await {
                    Ok(report) => println!(
                        "Loaded {} FAQ pairs ({} skipped).",
                        report.added, report.skipped
                    ),
                    Err(e) => {
                        warn!("Training failed: {:#}", e);
                        println!("Training failed: {:#}", e);
                    }
                },
                Input::History(n) => print_history(&session, n).await,
                Input::Help => println!("{}", HELP),
                Input::Quit => break,
                Input::Invalid(reason) => println!("{}", reason),
            }
        }

        for handle in pending {
            if let Err(e) = handle.await {
                error!("Reply task failed: {}", e);
            }
        }
        // Closing the session's sender lets the printer finish the queue.
        drop(session);
        printer.await?;
        Ok(())
    }
}

async fn print_history(session: &ChatSession, limit: i64) {
    match session.history(limit).await {
        Ok(messages) => {
            for m in &messages {
                println!("{}", render(m));
            }
        }
        Err(e) => {
            error!("Failed to load history: {}", e);
            println!("(history unavailable: {})", e);
        }
    }
}
