use super::FaqStore;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainReport {
    pub added: usize,
    pub skipped: usize,
}

/// Parses `question,answer` rows. The split happens at the first comma so
/// answers may contain commas; blank lines and `#` comments are ignored.
pub fn parse_rows(content: &str) -> (Vec<(String, String)>, usize) {
    let mut rows = Vec::new();
    let mut skipped = 0;

    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if rows.is_empty() && skipped == 0 && line.eq_ignore_ascii_case("question,answer") {
            continue;
        }

        match line.split_once(',') {
            Some((q, a)) if !q.trim().is_empty() && !a.trim().is_empty() => {
                rows.push((q.trim().to_string(), a.trim().to_string()));
            }
            _ => {
                warn!("Skipping malformed trainer row {}: {:?}", n + 1, line);
                skipped += 1;
            }
        }
    }

    (rows, skipped)
}

pub fn train(store: &FaqStore, content: &str) -> TrainReport {
    let (rows, skipped) = parse_rows(content);
    let added = rows.len();
    for (q, a) in rows {
        store.add(&q, a);
    }
    TrainReport { added, skipped }
}

pub async fn train_from_file(store: &FaqStore, path: &Path) -> Result<TrainReport> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read trainer file: {}", path.display()))?;

    let report = train(store, &content);
    info!(
        "Trained {} FAQ pairs from {} ({} skipped)",
        report.added,
        path.display(),
        report.skipped
    );
    Ok(report)
}
