//! Episode entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An episode, as returned by `/episode` and `/episode/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    /// Air date as printed by the API, e.g. `"December 2, 2013"`.
    pub air_date: String,
    /// Season and episode code, e.g. `"S01E01"`.
    #[serde(rename = "episode")]
    pub code: String,
    /// URLs of the characters that appear in this episode.
    pub characters: Vec<String>,
    pub url: String,
    pub created: DateTime<Utc>,
}
