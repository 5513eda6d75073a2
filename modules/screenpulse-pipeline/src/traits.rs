// Trait abstractions for pipeline dependencies.
//
// PostSource — external social search (Murmur in production).
// PostStorage — durable dedup storage of raw posts.
// PolarityScorer / Classifier — the two independent sentiment classifiers.
// ReferenceSource — external title rating lookup (Cinedex in production).
// RatingSink — append-only persistence of finished records.
//
// Every trait returns the pipeline error taxonomy; the impls below map
// each collaborator's own error type onto the variant the pipeline
// assigns to that boundary. These enable deterministic testing with
// in-memory mocks: no network, no database.

use async_trait::async_trait;

use screenpulse_common::{PipelineError, Post, RatingRecord, Result, SentimentLabel, TitleCandidate};

/// A post as delivered by the external source, before it is attributed
/// to a subject and stored.
#[derive(Debug, Clone)]
pub struct SourcePost {
    pub external_id: String,
    pub text: String,
    pub lang: Option<String>,
}

// ---------------------------------------------------------------------------
// PostSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch recent posts matching a subject, newest first, at most
    /// `max_results` of them.
    async fn fetch_recent(&self, subject: &str, max_results: u32) -> Result<Vec<SourcePost>>;
}

#[async_trait]
impl PostSource for murmur_client::MurmurClient {
    async fn fetch_recent(&self, subject: &str, max_results: u32) -> Result<Vec<SourcePost>> {
        let posts = self
            .search_recent(subject, max_results)
            .await
            .map_err(|e| PipelineError::SourceUnavailable(e.to_string()))?;

        Ok(posts
            .into_iter()
            .map(|p| SourcePost {
                external_id: p.id,
                text: p.text,
                lang: p.lang,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// PostStorage
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PostStorage: Send + Sync {
    /// Dedup-safe insert. Returns how many rows were actually new.
    async fn insert_ignore(&self, posts: &[Post]) -> Result<u64>;

    /// Total posts stored for a subject.
    async fn count(&self, subject: &str) -> Result<u64>;

    /// One page of posts for a subject, in a stable order.
    async fn page(&self, subject: &str, offset: u64, limit: u64) -> Result<Vec<Post>>;
}

#[async_trait]
impl PostStorage for screenpulse_store::PostStore {
    async fn insert_ignore(&self, posts: &[Post]) -> Result<u64> {
        self.insert_ignore(posts)
            .await
            .map_err(|e| PipelineError::StorageUnavailable(e.to_string()))
    }

    async fn count(&self, subject: &str) -> Result<u64> {
        self.count(subject)
            .await
            .map_err(|e| PipelineError::StorageUnavailable(e.to_string()))
    }

    async fn page(&self, subject: &str, offset: u64, limit: u64) -> Result<Vec<Post>> {
        self.page(subject, offset, limit)
            .await
            .map_err(|e| PipelineError::StorageUnavailable(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Classifiers
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PolarityScorer: Send + Sync {
    /// Continuous polarity in [-1, 1].
    async fn score(&self, text: &str) -> Result<f64>;
}

#[async_trait]
impl PolarityScorer for screenpulse_classify::LexiconScorer {
    async fn score(&self, text: &str) -> Result<f64> {
        Ok(self.score(text))
    }
}

#[async_trait]
pub trait Classifier: Send + Sync {
    /// Categorical label with its confidence in [0, 1].
    async fn classify(&self, text: &str) -> Result<(SentimentLabel, f64)>;
}

#[async_trait]
impl Classifier for screenpulse_classify::ModelClassifier {
    async fn classify(&self, text: &str) -> Result<(SentimentLabel, f64)> {
        let prediction = self
            .classify(text)
            .await
            .map_err(|e| PipelineError::Classification(e.to_string()))?;

        Ok((prediction.label, prediction.confidence))
    }
}

// ---------------------------------------------------------------------------
// ReferenceSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Search the reference catalogue for candidates matching a query.
    async fn search_titles(&self, query: &str) -> Result<Vec<TitleCandidate>>;

    /// Resolve a candidate id to its numeric rating, when it has one.
    async fn title_detail(&self, id: &str) -> Result<Option<f64>>;
}

#[async_trait]
impl ReferenceSource for cinedex_client::CinedexClient {
    async fn search_titles(&self, query: &str) -> Result<Vec<TitleCandidate>> {
        let hits = self
            .search_titles(query)
            .await
            .map_err(|e| PipelineError::ReferenceLookupFailed(e.to_string()))?;

        Ok(hits
            .into_iter()
            .map(|h| TitleCandidate {
                id: h.id,
                title: h.title,
                year: h.year,
            })
            .collect())
    }

    async fn title_detail(&self, id: &str) -> Result<Option<f64>> {
        let detail = self
            .title_detail(id)
            .await
            .map_err(|e| PipelineError::ReferenceLookupFailed(e.to_string()))?;

        Ok(detail.rating)
    }
}

// ---------------------------------------------------------------------------
// RatingSink
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RatingSink: Send + Sync {
    /// Persist one finished record atomically.
    async fn append(&self, record: &RatingRecord) -> Result<()>;
}

#[async_trait]
impl RatingSink for screenpulse_store::RatingStore {
    async fn append(&self, record: &RatingRecord) -> Result<()> {
        self.append(record)
            .await
            .map_err(|e| PipelineError::PersistenceFailed(e.to_string()))
    }
}
