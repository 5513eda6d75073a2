pub mod error;
pub mod types;

pub use error::{CinedexError, Result};
pub use types::{TitleDetail, TitleHit};

use std::time::Duration;

const BASE_URL: &str = "https://api.cinedex.io/v1";

pub struct CinedexClient {
    client: reqwest::Client,
    api_key: String,
}

impl CinedexClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, api_key }
    }

    /// Search the title catalogue. Returns every hit for the query,
    /// including remakes and re-releases under the same name.
    pub async fn search_titles(&self, query: &str) -> Result<Vec<TitleHit>> {
        let url = format!("{BASE_URL}/titles/search");

        let resp = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CinedexError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: types::SearchResponse = resp.json().await?;
        tracing::debug!(query, hits = envelope.results.len(), "cinedex: title search");

        Ok(envelope.results)
    }

    /// Fetch the full detail for one title by id.
    pub async fn title_detail(&self, id: &str) -> Result<TitleDetail> {
        let url = format!("{BASE_URL}/titles/{id}");

        let resp = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CinedexError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}
