//! Endpoint registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidUrlError};

use super::ApiUrl;

/// The fixed set of resource kinds exposed by the API.
///
/// Each kind owns one base path (`/character`, `/location`, `/episode`)
/// and one partition of the response cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    /// Characters, the primary entity.
    Character,
    /// Locations, the secondary entity.
    Location,
    /// Episodes, the event entity.
    Episode,
}

impl EndpointKind {
    /// Every endpoint kind, in declaration order.
    pub const ALL: [EndpointKind; 3] = [
        EndpointKind::Character,
        EndpointKind::Location,
        EndpointKind::Episode,
    ];

    /// Returns the base path segment for this kind.
    pub fn path(self) -> &'static str {
        match self {
            EndpointKind::Character => "character",
            EndpointKind::Location => "location",
            EndpointKind::Episode => "episode",
        }
    }

    /// Infers the endpoint of an absolute URL that lives under `base`.
    ///
    /// Returns `None` for URLs on other hosts or with an unknown first segment.
    pub fn from_url(base: &ApiUrl, url: &Url) -> Option<Self> {
        let segments = base.relative_segments(url)?;
        segments.first()?.parse().ok()
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for EndpointKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path() == s)
            .ok_or_else(|| InvalidUrlError::new(s, "unknown endpoint").into())
    }
}
