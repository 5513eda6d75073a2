// Test doubles for the pipeline trait boundaries.
//
// MemoryPostStorage — stateful in-memory dedup store with call counters
// StaticPostSource / FailingPostSource — canned or failing fetches
// FixedScorer / FixedClassifier — HashMap keyed by post body
// MockReferenceSource — canned candidates, records detail calls
// MemoryRatingSink / FailingRatingSink — record capture or forced failure

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use screenpulse_common::{PipelineError, Post, RatingRecord, Result, SentimentLabel, TitleCandidate};

use crate::traits::{
    Classifier, PolarityScorer, PostSource, PostStorage, RatingSink, ReferenceSource, SourcePost,
};

// ---------------------------------------------------------------------------
// MemoryPostStorage
// ---------------------------------------------------------------------------

/// In-memory post store. Preserves insertion order, dedups on
/// (subject, external_id), and counts calls for pagination assertions.
pub struct MemoryPostStorage {
    posts: Mutex<Vec<Post>>,
    count_calls: AtomicU32,
    page_calls: AtomicU32,
    count_override: Option<u64>,
    fail_pages: bool,
}

impl MemoryPostStorage {
    pub fn new() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            count_calls: AtomicU32::new(0),
            page_calls: AtomicU32::new(0),
            count_override: None,
            fail_pages: false,
        }
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        let store = Self::new();
        *store.posts.lock().unwrap() = posts;
        store
    }

    /// Report this total instead of the live count — simulates a set
    /// that shrank after the scan started.
    pub fn with_count_override(mut self, total: u64) -> Self {
        self.count_override = Some(total);
        self
    }

    /// Every page fetch fails.
    pub fn failing_pages(mut self) -> Self {
        self.fail_pages = true;
        self
    }

    pub fn count_calls(&self) -> u32 {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> u32 {
        self.page_calls.load(Ordering::SeqCst)
    }

    /// Live posts for a subject (for test assertions).
    pub fn stored(&self, subject: &str) -> Vec<Post> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.subject == subject)
            .cloned()
            .collect()
    }
}

impl Default for MemoryPostStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStorage for MemoryPostStorage {
    async fn insert_ignore(&self, posts: &[Post]) -> Result<u64> {
        let mut stored = self.posts.lock().unwrap();
        let mut inserted = 0;
        for post in posts {
            let exists = stored
                .iter()
                .any(|p| p.subject == post.subject && p.external_id == post.external_id);
            if !exists {
                stored.push(post.clone());
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn count(&self, subject: &str) -> Result<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(total) = self.count_override {
            return Ok(total);
        }
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.subject == subject)
            .count() as u64)
    }

    async fn page(&self, subject: &str, offset: u64, limit: u64) -> Result<Vec<Post>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pages {
            return Err(PipelineError::StorageUnavailable(
                "page fetch failed".to_string(),
            ));
        }
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.subject == subject)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Post sources
// ---------------------------------------------------------------------------

/// Returns the same canned posts on every fetch.
pub struct StaticPostSource {
    posts: Vec<SourcePost>,
}

impl StaticPostSource {
    pub fn new(posts: Vec<SourcePost>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl PostSource for StaticPostSource {
    async fn fetch_recent(&self, _subject: &str, max_results: u32) -> Result<Vec<SourcePost>> {
        Ok(self
            .posts
            .iter()
            .take(max_results as usize)
            .cloned()
            .collect())
    }
}

/// Every fetch fails as if the source were down.
pub struct FailingPostSource;

#[async_trait]
impl PostSource for FailingPostSource {
    async fn fetch_recent(&self, _subject: &str, _max_results: u32) -> Result<Vec<SourcePost>> {
        Err(PipelineError::SourceUnavailable(
            "connection refused".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// Classifiers
// ---------------------------------------------------------------------------

/// Polarity by exact post body. Unregistered bodies score 0.
pub struct FixedScorer {
    scores: HashMap<String, f64>,
}

impl FixedScorer {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    pub fn on(mut self, body: &str, polarity: f64) -> Self {
        self.scores.insert(body.to_string(), polarity);
        self
    }
}

impl Default for FixedScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PolarityScorer for FixedScorer {
    async fn score(&self, text: &str) -> Result<f64> {
        Ok(self.scores.get(text).copied().unwrap_or(0.0))
    }
}

/// Label and confidence by exact post body. Unregistered bodies come
/// back neutral at zero confidence.
pub struct FixedClassifier {
    labels: HashMap<String, (SentimentLabel, f64)>,
}

impl FixedClassifier {
    pub fn new() -> Self {
        Self {
            labels: HashMap::new(),
        }
    }

    pub fn on(mut self, body: &str, label: SentimentLabel, confidence: f64) -> Self {
        self.labels.insert(body.to_string(), (label, confidence));
        self
    }
}

impl Default for FixedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, text: &str) -> Result<(SentimentLabel, f64)> {
        Ok(self
            .labels
            .get(text)
            .copied()
            .unwrap_or((SentimentLabel::Neutral, 0.0)))
    }
}

// ---------------------------------------------------------------------------
// MockReferenceSource
// ---------------------------------------------------------------------------

/// Canned title candidates and detail ratings. Records every detail
/// lookup so tests can assert one was (or wasn't) made.
pub struct MockReferenceSource {
    candidates: Vec<TitleCandidate>,
    details: HashMap<String, Option<f64>>,
    detail_calls: Mutex<Vec<String>>,
    fail_search: bool,
    fail_detail: bool,
}

impl MockReferenceSource {
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            details: HashMap::new(),
            detail_calls: Mutex::new(Vec::new()),
            fail_search: false,
            fail_detail: false,
        }
    }

    pub fn with_candidates(mut self, candidates: Vec<TitleCandidate>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_detail(mut self, id: &str, rating: Option<f64>) -> Self {
        self.details.insert(id.to_string(), rating);
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_detail(mut self) -> Self {
        self.fail_detail = true;
        self
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

impl Default for MockReferenceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReferenceSource for MockReferenceSource {
    async fn search_titles(&self, _query: &str) -> Result<Vec<TitleCandidate>> {
        if self.fail_search {
            return Err(PipelineError::ReferenceLookupFailed(
                "search unavailable".to_string(),
            ));
        }
        Ok(self.candidates.clone())
    }

    async fn title_detail(&self, id: &str) -> Result<Option<f64>> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        if self.fail_detail {
            return Err(PipelineError::ReferenceLookupFailed(
                "detail unavailable".to_string(),
            ));
        }
        Ok(self.details.get(id).copied().flatten())
    }
}

// ---------------------------------------------------------------------------
// Rating sinks
// ---------------------------------------------------------------------------

/// Captures appended records for assertions.
pub struct MemoryRatingSink {
    records: Mutex<Vec<RatingRecord>>,
}

impl MemoryRatingSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<RatingRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MemoryRatingSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RatingSink for MemoryRatingSink {
    async fn append(&self, record: &RatingRecord) -> Result<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Every append fails.
pub struct FailingRatingSink;

#[async_trait]
impl RatingSink for FailingRatingSink {
    async fn append(&self, _record: &RatingRecord) -> Result<()> {
        Err(PipelineError::PersistenceFailed(
            "insert failed".to_string(),
        ))
    }
}
