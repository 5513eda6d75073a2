use serde::Deserialize;

/// A title search hit. Unreleased titles have no year yet; Cinedex
/// reports those as 0.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleHit {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: i32,
}

/// Full detail for one title.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleDetail {
    pub id: String,
    pub title: String,
    /// Community rating on a 0–10 scale. Absent for unrated titles.
    pub rating: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<TitleHit>,
}
