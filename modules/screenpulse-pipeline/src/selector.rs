//! Reference-rating candidate selection.

use tracing::warn;

use screenpulse_common::TitleCandidate;

use crate::traits::ReferenceSource;

/// Pick the authoritative candidate for a subject.
///
/// Only exact case-insensitive title matches qualify — substring matches
/// would happily select an unrelated work with a similar name. Among the
/// matches the newest year wins; ties keep the first candidate seen.
pub fn pick_candidate<'a>(
    candidates: &'a [TitleCandidate],
    subject: &str,
) -> Option<&'a TitleCandidate> {
    let subject_lower = subject.to_lowercase();
    let mut winner: Option<&TitleCandidate> = None;

    for candidate in candidates {
        if candidate.title.to_lowercase() != subject_lower {
            continue;
        }

        let newer = match winner {
            None => true,
            Some(current) => candidate.year > current.year,
        };
        if newer {
            winner = Some(candidate);
        }
    }

    winner
}

/// Resolve the reference rating for a subject.
///
/// A subject absent from the catalogue, an unrated winner, and a failed
/// lookup all yield 0.0 — reference-source trouble never blocks a
/// pipeline run, it is logged and absorbed here.
pub async fn reference_rating(source: &dyn ReferenceSource, subject: &str) -> f64 {
    let candidates = match source.search_titles(subject).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(subject, error = %e, "Reference title search failed");
            return 0.0;
        }
    };

    let winner = match pick_candidate(&candidates, subject) {
        Some(winner) => winner,
        None => return 0.0,
    };

    match source.title_detail(&winner.id).await {
        Ok(Some(rating)) => rating,
        Ok(None) => 0.0,
        Err(e) => {
            warn!(subject, id = winner.id.as_str(), error = %e, "Reference detail lookup failed");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockReferenceSource;

    fn candidate(id: &str, title: &str, year: i32) -> TitleCandidate {
        TitleCandidate {
            id: id.to_string(),
            title: title.to_string(),
            year,
        }
    }

    #[test]
    fn picks_newest_exact_match_case_insensitively() {
        let candidates = vec![
            candidate("a", "X", 2010),
            candidate("b", "X", 2015),
            candidate("c", "Y", 2020),
        ];

        let winner = pick_candidate(&candidates, "x").unwrap();
        assert_eq!(winner.id, "b");
        assert_eq!(winner.year, 2015);
    }

    #[test]
    fn substring_titles_do_not_match() {
        let candidates = vec![candidate("a", "Dune: Part Two", 2024)];
        assert!(pick_candidate(&candidates, "Dune").is_none());
    }

    #[test]
    fn year_ties_keep_first_seen() {
        let candidates = vec![
            candidate("first", "X", 2015),
            candidate("second", "X", 2015),
        ];

        assert_eq!(pick_candidate(&candidates, "X").unwrap().id, "first");
    }

    #[tokio::test]
    async fn no_match_returns_zero_without_detail_lookup() {
        let source = MockReferenceSource::new()
            .with_candidates(vec![candidate("a", "Y", 2020)])
            .with_detail("a", Some(9.1));

        assert_eq!(reference_rating(&source, "X").await, 0.0);
        assert!(source.detail_calls().is_empty());
    }

    #[tokio::test]
    async fn winner_detail_provides_the_rating() {
        let source = MockReferenceSource::new()
            .with_candidates(vec![
                candidate("a", "Inception", 2010),
                candidate("b", "inception", 2012),
            ])
            .with_detail("b", Some(8.8));

        assert_eq!(reference_rating(&source, "Inception").await, 8.8);
        assert_eq!(source.detail_calls(), vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn unrated_winner_returns_zero() {
        let source = MockReferenceSource::new()
            .with_candidates(vec![candidate("a", "X", 2026)])
            .with_detail("a", None);

        assert_eq!(reference_rating(&source, "X").await, 0.0);
    }

    #[tokio::test]
    async fn search_failure_is_absorbed() {
        let source = MockReferenceSource::new().failing_search();
        assert_eq!(reference_rating(&source, "X").await, 0.0);
    }

    #[tokio::test]
    async fn detail_failure_is_absorbed() {
        let source = MockReferenceSource::new()
            .with_candidates(vec![candidate("a", "X", 2020)])
            .failing_detail();

        assert_eq!(reference_rating(&source, "X").await, 0.0);
    }
}
