use serde::Deserialize;

/// A single post from the Murmur recent-search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MurmurPost {
    pub id: String,
    pub text: String,
    /// BCP-47 language tag as detected by Murmur ("en", "pt", ...).
    pub lang: Option<String>,
}

/// Envelope for search responses.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub data: Vec<MurmurPost>,
    pub meta: Option<SearchMeta>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchMeta {
    pub next_cursor: Option<String>,
}
