//! Location entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A location, as returned by `/location` and `/location/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    /// Planet, space station, microverse...
    #[serde(rename = "type")]
    pub kind: String,
    pub dimension: String,
    /// URLs of the characters last seen here.
    pub residents: Vec<String>,
    pub url: String,
    pub created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::References;

    #[test]
    fn type_field_decodes_as_kind() {
        let location: Location = serde_json::from_str(
            r#"{
                "id": 3,
                "name": "Citadel of Ricks",
                "type": "Space station",
                "dimension": "unknown",
                "residents": [
                    "https://rickandmortyapi.com/api/character/8",
                    "https://rickandmortyapi.com/api/character/14"
                ],
                "url": "https://rickandmortyapi.com/api/location/3",
                "created": "2017-11-10T13:08:13.191Z"
            }"#,
        )
        .unwrap();
        assert_eq!(location.kind, "Space station");
        assert_eq!(location.dimension, "unknown");
        assert_eq!(location.residents.len(), 2);
        assert_eq!(location.references(), location.residents.as_slice());
    }

    #[test]
    fn location_without_residents_decodes() {
        let location: Location = serde_json::from_str(
            r#"{
                "id": 54,
                "name": "Interdimensional Customs",
                "type": "Customs",
                "dimension": "unknown",
                "residents": [],
                "url": "https://rickandmortyapi.com/api/location/54",
                "created": "2017-12-29T18:46:12.343Z"
            }"#,
        )
        .unwrap();
        assert!(location.residents.is_empty());
        assert_eq!(
            serde_json::to_value(&location).unwrap()["type"],
            "Customs"
        );
    }
}
