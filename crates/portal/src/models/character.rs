//! Character entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A character, as returned by `/character` and `/character/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub status: CharacterStatus,
    pub species: String,
    /// Sub-species or variant; often empty.
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: Gender,
    /// Where the character comes from.
    pub origin: NamedLink,
    /// Last known location.
    pub location: NamedLink,
    /// Avatar image URL.
    pub image: String,
    /// URLs of the episodes the character appears in.
    pub episode: Vec<String>,
    pub url: String,
    pub created: DateTime<Utc>,
}

impl Character {
    /// Display form of the status.
    pub fn status_text(&self) -> &'static str {
        self.status.text()
    }
}

/// Life status of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl CharacterStatus {
    /// Display form with a capitalized `Unknown`.
    pub fn text(self) -> &'static str {
        match self {
            CharacterStatus::Alive => "Alive",
            CharacterStatus::Dead => "Dead",
            CharacterStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Genderless,
    #[serde(rename = "unknown")]
    Unknown,
}

/// A named reference to a location. `url` is empty when the location is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedLink {
    pub name: String,
    pub url: String,
}

impl NamedLink {
    /// Returns the link target, if the server provided one.
    pub fn url(&self) -> Option<&str> {
        if self.url.is_empty() {
            None
        } else {
            Some(&self.url)
        }
    }
}
