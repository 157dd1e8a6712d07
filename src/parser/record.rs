use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One parsed search hit. Every field but `rank` may be missing from the
/// markup and is then `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub name: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Zero-based position among the result blocks of the page.
    pub rank: usize,
    pub breadcrumb: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub related_searches: Vec<String>,
    /// Document order; `results[i].rank == i`.
    pub results: Vec<ResultRecord>,
}
