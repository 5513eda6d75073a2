//! Offset-paginated scan over stored posts.

use screenpulse_common::{Post, Result};

use crate::traits::PostStorage;

/// Consecutive empty pages after which a scan gives up. Concurrent
/// deletes may legitimately shrink the live set below the total read at
/// scan start; the scanner must not loop forever chasing it.
const MAX_EMPTY_PAGES: u32 = 2;

/// Pages through every post stored for a subject without holding the
/// full set in memory.
///
/// The total is read once, on the first `next_page` call; the scan stops
/// once that many posts have been yielded. A partial last page is
/// normal. A short or empty page before the total is reached is a no-op
/// advance, not an error. Re-invocable from a fresh instance, not
/// resumable mid-iteration.
pub struct BatchScanner<'a> {
    store: &'a dyn PostStorage,
    subject: &'a str,
    page_size: u64,
    total: Option<u64>,
    offset: u64,
    yielded: u64,
    empty_pages: u32,
}

impl<'a> BatchScanner<'a> {
    pub fn new(store: &'a dyn PostStorage, subject: &'a str, page_size: u64) -> Self {
        Self {
            store,
            subject,
            page_size: page_size.max(1),
            total: None,
            offset: 0,
            yielded: 0,
            empty_pages: 0,
        }
    }

    /// Fetch the next non-empty page, or `Ok(None)` once the scan is
    /// complete. A page-fetch error aborts the scan; pages already
    /// yielded are not rolled back.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Post>>> {
        let total = match self.total {
            Some(t) => t,
            None => {
                let t = self.store.count(self.subject).await?;
                self.total = Some(t);
                t
            }
        };

        while self.yielded < total && self.empty_pages < MAX_EMPTY_PAGES {
            let page = self
                .store
                .page(self.subject, self.offset, self.page_size)
                .await?;
            self.offset += self.page_size;

            if page.is_empty() {
                self.empty_pages += 1;
                continue;
            }

            self.empty_pages = 0;
            self.yielded += page.len() as u64;
            return Ok(Some(page));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryPostStorage;
    use screenpulse_common::PipelineError;

    fn posts(subject: &str, n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| Post {
                subject: subject.to_string(),
                external_id: format!("id-{i:03}"),
                body: format!("post {i}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn scans_exact_pages_and_stops_without_extra_fetch() {
        let store = MemoryPostStorage::with_posts(posts("dune", 7));
        let mut scanner = BatchScanner::new(&store, "dune", 3);

        let mut sizes = Vec::new();
        while let Some(page) = scanner.next_page().await.unwrap() {
            sizes.push(page.len());
        }

        assert_eq!(sizes, vec![3, 3, 1]);
        // 3 page fetches for the data, none after the total is reached.
        assert_eq!(store.page_calls(), 3);
        assert_eq!(store.count_calls(), 1);
    }

    #[tokio::test]
    async fn empty_subject_scans_nothing() {
        let store = MemoryPostStorage::new();
        let mut scanner = BatchScanner::new(&store, "dune", 3);

        assert!(scanner.next_page().await.unwrap().is_none());
        assert_eq!(store.page_calls(), 0);
    }

    #[tokio::test]
    async fn shrunken_live_set_terminates_after_two_empty_pages() {
        // The store claims 10 posts but the live set is gone: the scan
        // must give up rather than chase the stale total.
        let store = MemoryPostStorage::new().with_count_override(10);
        let mut scanner = BatchScanner::new(&store, "dune", 3);

        assert!(scanner.next_page().await.unwrap().is_none());
        assert_eq!(store.page_calls(), 2);
    }

    #[tokio::test]
    async fn page_error_propagates() {
        let store = MemoryPostStorage::with_posts(posts("dune", 5)).failing_pages();
        let mut scanner = BatchScanner::new(&store, "dune", 3);

        let err = scanner.next_page().await.unwrap_err();
        assert!(matches!(err, PipelineError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn partial_page_mid_scan_keeps_going() {
        // 5 live posts but a total of 6 on record: the scan yields all 5,
        // then runs into empty pages and stops cleanly.
        let store = MemoryPostStorage::with_posts(posts("dune", 5)).with_count_override(6);
        let mut scanner = BatchScanner::new(&store, "dune", 2);

        let mut yielded = 0;
        while let Some(page) = scanner.next_page().await.unwrap() {
            yielded += page.len();
        }

        assert_eq!(yielded, 5);
    }
}
