use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One ingested social post attributed to a subject.
///
/// Identity is (subject, external_id). Re-inserting an existing identity
/// is a silent no-op, and a stored post is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub subject: String,
    pub external_id: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Negative => write!(f, "negative"),
            SentimentLabel::Neutral => write!(f, "neutral"),
        }
    }
}

/// Two parallel sentiment tallies, one per classifier.
///
/// The lexicon and model tallies are kept separate because the two
/// classifiers can disagree; they are never merged. Posts with no decisive
/// sentiment (zero polarity, low confidence, neutral label) count in
/// neither side of their tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentAggregate {
    pub lexicon_positive: u32,
    pub lexicon_negative: u32,
    pub model_positive: u32,
    pub model_negative: u32,
    pub lexicon_rating: f64,
    pub model_rating: f64,
}

/// A year-stamped title hit from the reference source. Ephemeral —
/// produced by a title search, consumed by candidate selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCandidate {
    pub id: String,
    pub title: String,
    pub year: i32,
}

/// One persisted pipeline run for a subject. Append-only; a subject
/// accumulates one row per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub id: Uuid,
    pub subject: String,
    pub lexicon_rating: f64,
    pub model_rating: f64,
    pub reference_rating: f64,
    pub lexicon_positive: u32,
    pub lexicon_negative: u32,
    pub model_positive: u32,
    pub model_negative: u32,
    pub created_at: DateTime<Utc>,
}
