pub mod error;
pub mod types;

pub use error::{MurmurError, Result};
pub use types::MurmurPost;

use std::time::Duration;

const BASE_URL: &str = "https://api.murmur.social/v2";

/// Murmur caps a single search request at this many posts; larger asks
/// are paged with a cursor.
const MAX_PAGE: u32 = 100;

pub struct MurmurClient {
    client: reqwest::Client,
    token: String,
}

impl MurmurClient {
    pub fn new(token: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, token }
    }

    /// Search recent public posts matching a query, newest first.
    /// Follows the pagination cursor until `max_results` posts are
    /// collected or the result set is exhausted.
    pub async fn search_recent(&self, query: &str, max_results: u32) -> Result<Vec<MurmurPost>> {
        let mut posts: Vec<MurmurPost> = Vec::new();
        let mut cursor: Option<String> = None;

        while (posts.len() as u32) < max_results {
            let remaining = max_results - posts.len() as u32;
            let page = self
                .search_page(query, remaining.min(MAX_PAGE), cursor.as_deref())
                .await?;

            let got = page.posts.len();
            posts.extend(page.posts);

            match page.next_cursor {
                Some(c) if got > 0 => cursor = Some(c),
                _ => break,
            }
        }

        posts.truncate(max_results as usize);
        Ok(posts)
    }

    async fn search_page(
        &self,
        query: &str,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<SearchPage> {
        let url = format!("{BASE_URL}/search/recent");

        let mut params = vec![
            ("query".to_string(), query.to_string()),
            ("max_results".to_string(), limit.to_string()),
        ];
        if let Some(c) = cursor {
            params.push(("cursor".to_string(), c.to_string()));
        }

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MurmurError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: types::SearchResponse = resp.json().await?;
        tracing::debug!(query, count = envelope.data.len(), "murmur: search page");

        Ok(SearchPage {
            posts: envelope.data,
            next_cursor: envelope.meta.and_then(|m| m.next_cursor),
        })
    }
}

struct SearchPage {
    posts: Vec<MurmurPost>,
    next_cursor: Option<String>,
}
