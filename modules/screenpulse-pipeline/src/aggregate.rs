//! Dual-classifier sentiment fold.

use screenpulse_common::{Post, Result, SentimentAggregate, SentimentLabel};

use crate::scanner::BatchScanner;
use crate::traits::{Classifier, PolarityScorer};

/// Model classifications at or below this confidence are discarded.
const CONFIDENCE_FLOOR: f64 = 0.5;

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 0–10 rating from one positive/negative tally. An empty tally rates 0:
/// a post set with no decisive sentiment reads as neutral-low, not as a
/// midpoint.
fn tally_rating(positive: u32, negative: u32) -> f64 {
    let decisive = positive + negative;
    if decisive == 0 {
        return 0.0;
    }
    round1(positive as f64 / decisive as f64 * 10.0)
}

/// Folds every scanned post through both classifiers into two
/// independent tallies. Deterministic for a fixed post sequence and
/// fixed classifier behavior.
pub struct SentimentAggregator<'a> {
    scorer: &'a dyn PolarityScorer,
    classifier: &'a dyn Classifier,
}

impl<'a> SentimentAggregator<'a> {
    pub fn new(scorer: &'a dyn PolarityScorer, classifier: &'a dyn Classifier) -> Self {
        Self { scorer, classifier }
    }

    /// Drain the scanner and fold each post into the aggregate. A
    /// classifier failure aborts the fold.
    pub async fn aggregate(&self, scanner: &mut BatchScanner<'_>) -> Result<SentimentAggregate> {
        let mut agg = SentimentAggregate::default();

        while let Some(page) = scanner.next_page().await? {
            for post in &page {
                self.fold(post, &mut agg).await?;
            }
        }

        agg.lexicon_rating = tally_rating(agg.lexicon_positive, agg.lexicon_negative);
        agg.model_rating = tally_rating(agg.model_positive, agg.model_negative);
        Ok(agg)
    }

    async fn fold(&self, post: &Post, agg: &mut SentimentAggregate) -> Result<()> {
        // Polarity is rounded to one decimal before the sign test, so a
        // near-zero score lands in the neutral bucket.
        let polarity = round1(self.scorer.score(&post.body).await?);
        if polarity > 0.0 {
            agg.lexicon_positive += 1;
        } else if polarity < 0.0 {
            agg.lexicon_negative += 1;
        }

        let (label, confidence) = self.classifier.classify(&post.body).await?;
        if confidence > CONFIDENCE_FLOOR {
            match label {
                SentimentLabel::Positive => agg.model_positive += 1,
                SentimentLabel::Negative => agg.model_negative += 1,
                SentimentLabel::Neutral => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedClassifier, FixedScorer, MemoryPostStorage};

    fn post(subject: &str, id: &str, body: &str) -> Post {
        Post {
            subject: subject.to_string(),
            external_id: id.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn rating_of_empty_tally_is_zero() {
        assert_eq!(tally_rating(0, 0), 0.0);
    }

    #[test]
    fn rating_rounds_to_one_decimal() {
        assert_eq!(tally_rating(6, 3), 6.7);
        assert_eq!(tally_rating(5, 2), 7.1);
        assert_eq!(tally_rating(1, 0), 10.0);
        assert_eq!(tally_rating(0, 4), 0.0);
    }

    #[tokio::test]
    async fn no_posts_yields_zero_ratings() {
        let store = MemoryPostStorage::new();
        let scorer = FixedScorer::new();
        let classifier = FixedClassifier::new();

        let mut scanner = BatchScanner::new(&store, "dune", 10);
        let agg = SentimentAggregator::new(&scorer, &classifier)
            .aggregate(&mut scanner)
            .await
            .unwrap();

        assert_eq!(agg, SentimentAggregate::default());
    }

    #[tokio::test]
    async fn zero_polarity_and_low_confidence_count_nowhere() {
        let posts = vec![
            post("dune", "1", "flat"),
            post("dune", "2", "unsure"),
        ];
        let store = MemoryPostStorage::with_posts(posts);
        let scorer = FixedScorer::new().on("flat", 0.0).on("unsure", 0.3);
        let classifier = FixedClassifier::new()
            .on("flat", SentimentLabel::Positive, 0.5)
            .on("unsure", SentimentLabel::Negative, 0.2);

        let mut scanner = BatchScanner::new(&store, "dune", 10);
        let agg = SentimentAggregator::new(&scorer, &classifier)
            .aggregate(&mut scanner)
            .await
            .unwrap();

        // "flat" has zero polarity; "unsure" rounds to 0.3 and counts.
        assert_eq!(agg.lexicon_positive, 1);
        assert_eq!(agg.lexicon_negative, 0);
        // Confidence 0.5 sits at the floor and is discarded, as is 0.2.
        assert_eq!(agg.model_positive, 0);
        assert_eq!(agg.model_negative, 0);
        assert_eq!(agg.model_rating, 0.0);
    }

    #[tokio::test]
    async fn tallies_never_exceed_post_count() {
        let posts: Vec<Post> = (0..8)
            .map(|i| post("dune", &i.to_string(), &format!("body {i}")))
            .collect();
        let n = posts.len() as u32;

        let store = MemoryPostStorage::with_posts(posts);
        let scorer = FixedScorer::new()
            .on("body 0", 0.8)
            .on("body 1", -0.4)
            .on("body 2", 0.2);
        let classifier = FixedClassifier::new()
            .on("body 0", SentimentLabel::Positive, 0.9)
            .on("body 5", SentimentLabel::Negative, 0.7);

        let mut scanner = BatchScanner::new(&store, "dune", 3);
        let agg = SentimentAggregator::new(&scorer, &classifier)
            .aggregate(&mut scanner)
            .await
            .unwrap();

        assert!(agg.lexicon_positive + agg.lexicon_negative <= n);
        assert!(agg.model_positive + agg.model_negative <= n);
    }

    #[tokio::test]
    async fn aggregation_is_deterministic() {
        let posts: Vec<Post> = (0..5)
            .map(|i| post("dune", &i.to_string(), &format!("body {i}")))
            .collect();
        let store = MemoryPostStorage::with_posts(posts);
        let scorer = FixedScorer::new()
            .on("body 0", 0.6)
            .on("body 1", -0.6)
            .on("body 3", 0.1);
        let classifier = FixedClassifier::new()
            .on("body 0", SentimentLabel::Positive, 0.8)
            .on("body 2", SentimentLabel::Negative, 0.9);

        let aggregator = SentimentAggregator::new(&scorer, &classifier);

        let mut first_scan = BatchScanner::new(&store, "dune", 2);
        let first = aggregator.aggregate(&mut first_scan).await.unwrap();

        let mut second_scan = BatchScanner::new(&store, "dune", 2);
        let second = aggregator.aggregate(&mut second_scan).await.unwrap();

        assert_eq!(first, second);
    }
}
