pub mod trainer;

use serde::Deserialize;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use trainer::train_from_file;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Built-in question/answer pairs, fed into the store at startup in this order.
pub fn defaults() -> Vec<(String, String)> {
    [
        (
            "what can you do",
            "I can answer FAQs, remember recent messages, and help with simple tasks.",
        ),
        (
            "how do i train you",
            "Use the trainer to load CSV with question,answer rows or use the trainer CLI to add pairs.",
        ),
        (
            "are you offline",
            "Yes — NeuralDesk works offline using built-in rules and a small FAQ database.",
        ),
    ]
    .into_iter()
    .map(|(q, a)| (q.to_string(), a.to_string()))
    .collect()
}

/// Ordered question -> answer table. Keys are stored lowercased; re-adding an
/// existing key replaces its answer in place.
#[derive(Debug, Default)]
pub struct FaqStore {
    entries: RwLock<Vec<FaqEntry>>,
}

impl FaqStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, Q, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: AsRef<str>,
        A: Into<String>,
    {
        let store = Self::new();
        for (q, a) in pairs {
            store.add(q.as_ref(), a);
        }
        store
    }

    pub fn add(&self, question: &str, answer: impl Into<String>) {
        let question = question.to_lowercase();
        let answer = answer.into();
        let mut entries = self.write();

        match entries.iter_mut().find(|e| e.question == question) {
            Some(entry) => entry.answer = answer,
            None => entries.push(FaqEntry { question, answer }),
        }
    }

    /// Returns the answer of the first key (in insertion order) that equals,
    /// contains, or is contained in the lowercased input.
    ///
    /// Containment is checked both ways, so a short key such as "cost" matches
    /// any input mentioning it.
    pub fn find(&self, input: &str) -> Option<String> {
        let input = input.to_lowercase();
        self.read()
            .iter()
            .find(|e| {
                input == e.question || input.contains(&e.question) || e.question.contains(&input)
            })
            .map(|e| e.answer.clone())
    }

    pub fn list(&self) -> Vec<FaqEntry> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    // Entries are replaced whole under the write lock, so a poisoned lock
    // still guards a consistent table.
    fn read(&self) -> RwLockReadGuard<'_, Vec<FaqEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<FaqEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn questions(store: &FaqStore) -> Vec<(String, String)> {
        store
            .list()
            .into_iter()
            .map(|e| (e.question, e.answer))
            .collect()
    }

    #[test]
    fn add_lowercases_key() {
        let store = FaqStore::new();
        store.add("Are You Offline", "Yes");
        assert_eq!(store.list()[0].question, "are you offline");
    }

    #[test]
    fn overwrite_keeps_original_position() {
        let store = FaqStore::new();
        store.add("x", "a");
        store.add("y", "b");
        store.add("X", "c");

        assert_eq!(
            questions(&store),
            vec![
                ("x".to_string(), "c".to_string()),
                ("y".to_string(), "b".to_string())
            ]
        );
    }

    #[test]
    fn find_is_case_insensitive_exact() {
        let store = FaqStore::with_entries([("are you offline", "Yes...")]);
        assert_eq!(store.find("ARE YOU OFFLINE"), Some("Yes...".to_string()));
    }

    #[test]
    fn find_accepts_containment_both_ways() {
        let store = FaqStore::with_entries([("cost", "pricing"), ("how do i train you", "train")]);
        assert_eq!(store.find("the cost of eggs"), Some("pricing".to_string()));
        assert_eq!(store.find("train"), Some("train".to_string()));
        assert_eq!(store.find("weather"), None);
    }

    #[test]
    fn first_inserted_key_wins_ties() {
        let store = FaqStore::with_entries([("price", "first"), ("price list", "second")]);
        assert_eq!(store.find("show me the price list"), Some("first".to_string()));
    }

    #[test]
    fn defaults_load_in_order() {
        let store = FaqStore::with_entries(defaults());
        let list = store.list();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].question, "what can you do");
        assert_eq!(list[2].question, "are you offline");
    }

    #[test]
    fn concurrent_adds_and_finds_see_whole_entries() {
        let store = Arc::new(FaqStore::new());
        let writers: Vec<_> = (0..4)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        store.add(&format!("key {} {}", t, i), format!("answer {} {}", t, i));
                    }
                })
            })
            .collect();

        let reader = {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    if let Some(answer) = store.find("key 0 1") {
                        assert!(answer.starts_with("answer 0 1"));
                    }
                }
            })
        };

        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap();
        assert_eq!(store.len(), 200);
    }
}
