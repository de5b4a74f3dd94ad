use crate::faq::FaqStore;
use crate::lexicon::{Lexicon, Sentiment};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

pub const QUESTION_REPLY: &str = "Good question — I'll look into that for you.";
pub const PRICING_REPLY: &str =
    "If you give me the product name I can check availability and price in the catalog.";
pub const GENERIC_REPLY: &str = "Thanks for that. Can you tell me more or ask a specific question?";

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub sentiment: Sentiment,
}

/// Lowercased word tokens, split on runs of non-word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    NON_WORD
        .split(&text.to_lowercase())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn fallback_reply(text: &str) -> &'static str {
    if text.ends_with('?') {
        return QUESTION_REPLY;
    }
    let lower = text.to_lowercase();
    if lower.contains("price") || lower.contains("cost") {
        PRICING_REPLY
    } else {
        GENERIC_REPLY
    }
}

pub struct ResponseEngine {
    lexicon: Lexicon,
    faq: Arc<FaqStore>,
}

impl ResponseEngine {
    pub fn new(lexicon: Lexicon, faq: Arc<FaqStore>) -> Self {
        Self { lexicon, faq }
    }

    pub fn faq(&self) -> &Arc<FaqStore> {
        &self.faq
    }

    /// Sentiment of the user's own words; never looks at any reply.
    pub fn analyze(&self, text: &str) -> Sentiment {
        let score: i32 = tokenize(text.trim())
            .iter()
            .map(|t| self.lexicon.score(t))
            .sum();
        Sentiment::from_score(score)
    }

    /// Callers reject blank input before getting here; blank text still gets
    /// the generic reply and a neutral label.
    pub fn respond(&self, user_text: &str) -> Response {
        let text = user_text.trim();

        let reply = match self.faq.find(text) {
            Some(answer) => {
                debug!("FAQ match for {:?}", text);
                answer
            }
            None => {
                let reply = fallback_reply(text);
                debug!("No FAQ match for {:?}, using fallback", text);
                reply.to_string()
            }
        };

        Response {
            text: reply,
            sentiment: self.analyze(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faq;

    fn engine_with(pairs: &[(&str, &str)]) -> ResponseEngine {
        ResponseEngine::new(
            Lexicon::default(),
            Arc::new(FaqStore::with_entries(pairs.iter().copied())),
        )
    }

    #[test]
    fn tokenize_splits_on_non_word_runs() {
        assert_eq!(
            tokenize("I LOVE this -- it's great!!"),
            vec!["i", "love", "this", "it", "s", "great"]
        );
        assert!(tokenize("?!... ").is_empty());
    }

    #[test]
    fn sentiment_ignores_reply_branch() {
        let engine = engine_with(&[]);
        let response = engine.respond("I love this, what is the price?");
        assert_eq!(response.sentiment, Sentiment::Positive);
        assert_eq!(response.text, QUESTION_REPLY);

        let engine = engine_with(&[("price", "Prices are on the website.")]);
        let response = engine.respond("I love this, what is the price?");
        assert_eq!(response.text, "Prices are on the website.");
        assert_eq!(response.sentiment, Sentiment::Positive);
    }

    #[test]
    fn sentiment_comes_from_input_not_answer() {
        let engine = engine_with(&[("refund", "Sorry about the terrible, awful experience")]);
        let response = engine.respond("refund");
        assert_eq!(response.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn faq_match_beats_fallback() {
        let engine = ResponseEngine::new(
            Lexicon::default(),
            Arc::new(FaqStore::with_entries(faq::defaults())),
        );
        let response = engine.respond("  Are You Offline?  ");
        assert!(response.text.starts_with("Yes — NeuralDesk works offline"));
    }

    #[test]
    fn short_key_matches_longer_input() {
        let engine = engine_with(&[("cost", "Costs vary.")]);
        assert_eq!(engine.respond("the cost of eggs").text, "Costs vary.");
    }

    #[test]
    fn question_mark_checked_before_pricing() {
        let engine = engine_with(&[]);
        assert_eq!(engine.respond("what is the price?").text, QUESTION_REPLY);
        assert_eq!(engine.respond("tell me the COST").text, PRICING_REPLY);
        assert_eq!(engine.respond("hello there").text, GENERIC_REPLY);
    }

    #[test]
    fn trailing_whitespace_does_not_hide_question_mark() {
        let engine = engine_with(&[]);
        assert_eq!(engine.respond("is it ready?   ").text, QUESTION_REPLY);
    }

    #[test]
    fn scores_sum_across_tokens() {
        let engine = engine_with(&[]);
        assert_eq!(engine.analyze("good good bad"), Sentiment::Positive);
        assert_eq!(engine.analyze("great but terrible and awful"), Sentiment::Negative);
        assert_eq!(engine.analyze("good and bad"), Sentiment::Neutral);
        assert_eq!(engine.analyze("1234 ... !!"), Sentiment::Neutral);
    }

    #[test]
    fn faq_added_at_runtime_is_used() {
        let engine = engine_with(&[]);
        assert_eq!(engine.respond("opening hours").text, GENERIC_REPLY);
        engine.faq().add("Opening Hours", "9 to 5");
        assert_eq!(engine.respond("opening hours").text, "9 to 5");
    }
}
