//! Lexicon-based polarity scoring.
//!
//! Continuous sentiment in [-1, 1], computed as the mean weight of
//! sentiment-bearing tokens. A recent negator ("not", "never", ...)
//! flips the next sentiment-bearing token it reaches.

use std::collections::HashMap;

/// Weighted sentiment vocabulary. Weights are polarity in [-1, 1].
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.9),
    ("awesome", 0.9),
    ("beautiful", 0.8),
    ("best", 0.9),
    ("brilliant", 0.9),
    ("captivating", 0.7),
    ("charming", 0.6),
    ("classic", 0.5),
    ("compelling", 0.6),
    ("delightful", 0.8),
    ("enjoyable", 0.6),
    ("enjoyed", 0.6),
    ("entertaining", 0.6),
    ("epic", 0.7),
    ("excellent", 0.9),
    ("fantastic", 0.9),
    ("favorite", 0.7),
    ("fun", 0.5),
    ("funny", 0.5),
    ("good", 0.7),
    ("gorgeous", 0.8),
    ("great", 0.8),
    ("gripping", 0.7),
    ("hilarious", 0.7),
    ("incredible", 0.9),
    ("impressive", 0.7),
    ("love", 0.8),
    ("loved", 0.8),
    ("masterpiece", 1.0),
    ("memorable", 0.6),
    ("perfect", 0.9),
    ("powerful", 0.6),
    ("recommend", 0.6),
    ("refreshing", 0.6),
    ("stunning", 0.8),
    ("superb", 0.9),
    ("thrilling", 0.7),
    ("touching", 0.6),
    ("wonderful", 0.9),
    ("worth", 0.4),
    // negative
    ("annoying", -0.6),
    ("awful", -0.9),
    ("bad", -0.7),
    ("boring", -0.7),
    ("bland", -0.5),
    ("cliche", -0.5),
    ("confusing", -0.4),
    ("disappointing", -0.7),
    ("disappointment", -0.7),
    ("disaster", -0.9),
    ("dreadful", -0.9),
    ("dull", -0.6),
    ("flop", -0.7),
    ("forgettable", -0.5),
    ("garbage", -0.9),
    ("hate", -0.8),
    ("hated", -0.8),
    ("horrible", -0.9),
    ("lame", -0.6),
    ("mediocre", -0.5),
    ("mess", -0.6),
    ("overrated", -0.5),
    ("painful", -0.6),
    ("pathetic", -0.8),
    ("pointless", -0.6),
    ("predictable", -0.4),
    ("ridiculous", -0.5),
    ("shallow", -0.4),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("tedious", -0.6),
    ("trash", -0.9),
    ("unwatchable", -1.0),
    ("waste", -0.8),
    ("weak", -0.4),
    ("worst", -1.0),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "cannot", "cant", "dont", "didnt", "doesnt", "isnt",
    "wasnt", "wont", "wouldnt", "hardly", "barely",
];

/// A negator flips a sentiment token at most this many tokens ahead.
const NEGATION_WINDOW: usize = 3;

pub struct LexiconScorer {
    weights: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            weights: LEXICON.iter().copied().collect(),
        }
    }

    /// Polarity of a text in [-1, 1]. Texts with no sentiment-bearing
    /// tokens score exactly 0.
    pub fn score(&self, text: &str) -> f64 {
        let mut sum = 0.0;
        let mut hits = 0u32;
        let mut since_negator = usize::MAX;

        for token in tokenize(text) {
            if NEGATORS.contains(&token.as_str()) {
                since_negator = 0;
                continue;
            }

            if let Some(&weight) = self.weights.get(token.as_str()) {
                let negated = since_negator < NEGATION_WINDOW;
                sum += if negated { -weight } else { weight };
                hits += 1;
                since_negator = usize::MAX;
            } else {
                since_negator = since_negator.saturating_add(1);
            }
        }

        if hits == 0 {
            return 0.0;
        }
        (sum / hits as f64).clamp(-1.0, 1.0)
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased alphanumeric tokens. Apostrophes are stripped in place so
/// "don't" matches the negator "dont".
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.chars()
                .filter(|c| *c != '\'')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_text_scores_positive() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("What a great movie, loved every minute") > 0.0);
    }

    #[test]
    fn negative_text_scores_negative() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("Terrible plot and a boring second act") < 0.0);
    }

    #[test]
    fn text_without_sentiment_scores_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score("The screening starts at nine tomorrow"), 0.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.score(""), 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        let scorer = LexiconScorer::new();
        assert!(scorer.score("not good") < 0.0);
        assert!(scorer.score("don't hate it") > 0.0);
    }

    #[test]
    fn negation_window_expires() {
        let scorer = LexiconScorer::new();
        // Four non-sentiment tokens between the negator and "good":
        // the negation no longer applies.
        assert!(scorer.score("not that the first hour was good") > 0.0);
    }

    #[test]
    fn score_stays_in_range() {
        let scorer = LexiconScorer::new();
        let s = scorer.score("masterpiece masterpiece masterpiece");
        assert!((-1.0..=1.0).contains(&s));
        let s = scorer.score("worst terrible unwatchable trash");
        assert!((-1.0..=1.0).contains(&s));
    }
}
