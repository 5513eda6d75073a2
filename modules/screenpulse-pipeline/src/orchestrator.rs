//! End-to-end pipeline run for one subject.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use screenpulse_common::{Post, RatingRecord, Result};

use crate::aggregate::SentimentAggregator;
use crate::scanner::BatchScanner;
use crate::selector;
use crate::traits::{Classifier, PolarityScorer, PostSource, PostStorage, RatingSink, ReferenceSource};

/// Immutable collaborators for pipeline runs, injected at construction.
#[derive(Clone)]
pub struct PipelineDeps {
    pub source: Arc<dyn PostSource>,
    pub posts: Arc<dyn PostStorage>,
    pub scorer: Arc<dyn PolarityScorer>,
    pub classifier: Arc<dyn Classifier>,
    pub reference: Arc<dyn ReferenceSource>,
    pub ratings: Arc<dyn RatingSink>,
}

pub struct Pipeline {
    deps: PipelineDeps,
    fetch_limit: u32,
    page_size: u64,
}

impl Pipeline {
    pub fn new(deps: PipelineDeps, fetch_limit: u32, page_size: u64) -> Self {
        Self {
            deps,
            fetch_limit,
            page_size,
        }
    }

    /// Run the full pipeline for one subject and return the persisted
    /// record.
    ///
    /// An unreachable item source degrades to previously stored posts.
    /// Storage failures abort the run before anything is persisted;
    /// reference-source failures never abort it.
    pub async fn run(&self, subject: &str) -> Result<RatingRecord> {
        // 1. Fetch fresh posts, keeping English ones. A dead source is
        //    not fatal: stored history still supports a run.
        match self.deps.source.fetch_recent(subject, self.fetch_limit).await {
            Ok(fetched) => {
                let total = fetched.len();
                let posts: Vec<Post> = fetched
                    .into_iter()
                    .filter(|p| p.lang.as_deref() == Some("en"))
                    .map(|p| Post {
                        subject: subject.to_string(),
                        external_id: p.external_id,
                        body: p.text,
                    })
                    .collect();

                let inserted = self.deps.posts.insert_ignore(&posts).await?;
                info!(subject, fetched = total, kept = posts.len(), inserted, "Stored fresh posts");
            }
            Err(e) => {
                warn!(subject, error = %e, "Item source unavailable, continuing with stored posts");
            }
        }

        // 2. Score everything ever stored for the subject, not just this
        //    run's batch — repeated runs refine the signal rather than
        //    replace it.
        let mut scanner = BatchScanner::new(self.deps.posts.as_ref(), subject, self.page_size);
        let aggregate = SentimentAggregator::new(
            self.deps.scorer.as_ref(),
            self.deps.classifier.as_ref(),
        )
        .aggregate(&mut scanner)
        .await?;

        // 3. Reference rating. Never blocks completion.
        let reference_rating =
            selector::reference_rating(self.deps.reference.as_ref(), subject).await;

        // 4. Assemble and persist in a single atomic write.
        let record = RatingRecord {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            lexicon_rating: aggregate.lexicon_rating,
            model_rating: aggregate.model_rating,
            reference_rating,
            lexicon_positive: aggregate.lexicon_positive,
            lexicon_negative: aggregate.lexicon_negative,
            model_positive: aggregate.model_positive,
            model_negative: aggregate.model_negative,
            created_at: Utc::now(),
        };

        self.deps.ratings.append(&record).await?;

        info!(
            subject,
            lexicon = record.lexicon_rating,
            model = record.model_rating,
            reference = record.reference_rating,
            "Pipeline run persisted"
        );

        Ok(record)
    }
}
