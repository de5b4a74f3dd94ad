use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "love",
    "happy",
    "awesome",
    "fantastic",
    "nice",
    "excellent",
    "best",
    "amazing",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "sad",
    "hate",
    "terrible",
    "awful",
    "worst",
    "angry",
    "disappointed",
    "poor",
    "problem",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Maps a summed lexicon score to its label.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s > 0 => Sentiment::Positive,
            s if s < 0 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment: {}", other)),
        }
    }
}

/// Fixed positive/negative word sets. Matching is exact after lowercasing,
/// with no stemming.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
        }
    }
}

impl Lexicon {
    pub fn score(&self, word: &str) -> i32 {
        let word = word.to_lowercase();
        if self.positive.contains(word.as_str()) {
            1
        } else if self.negative.contains(word.as_str()) {
            -1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_seed_words() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.score("love"), 1);
        assert_eq!(lexicon.score("problem"), -1);
        assert_eq!(lexicon.score("table"), 0);
    }

    #[test]
    fn score_ignores_case_but_not_stems() {
        let lexicon = Lexicon::default();
        assert_eq!(lexicon.score("GREAT"), 1);
        assert_eq!(lexicon.score("Awful"), -1);
        assert_eq!(lexicon.score("loved"), 0);
        assert_eq!(lexicon.score("problems"), 0);
        assert_eq!(lexicon.score(""), 0);
    }

    #[test]
    fn word_sets_are_disjoint() {
        let lexicon = Lexicon::default();
        assert!(lexicon.positive.is_disjoint(&lexicon.negative));
    }

    #[test]
    fn sentiment_labels_round_trip_through_strings() {
        for s in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
            assert_eq!(s.as_str().parse::<Sentiment>(), Ok(s));
        }
        assert!("happy".parse::<Sentiment>().is_err());
    }

    #[test]
    fn from_score_uses_sign() {
        assert_eq!(Sentiment::from_score(3), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(-1), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(0), Sentiment::Neutral);
    }
}
