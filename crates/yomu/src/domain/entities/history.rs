use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last chapter read for one manga, overwritten on every chapter view
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub manga_id: String,
    #[serde(default)]
    pub manga_title: String,
    pub chapter_id: String,
    pub chapter_number: Option<String>,
    #[serde(default)]
    pub language: String,
    pub read_at: DateTime<Utc>,
}
