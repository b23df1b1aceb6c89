//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidUrlError};

/// The public Rick and Morty API.
pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api";

/// A validated API base URL.
///
/// Every endpoint path is resolved relative to this base, and absolute URLs
/// returned by the server (pagination links, cross references) are matched
/// against it to recover their endpoint.
///
/// # Example
///
/// ```
/// use portal::ApiUrl;
///
/// let api = ApiUrl::new("https://rickandmortyapi.com/api/").unwrap();
/// assert_eq!(api.as_str(), "https://rickandmortyapi.com/api");
/// assert_eq!(
///     api.join(&["character", "1"]).unwrap().as_str(),
///     "https://rickandmortyapi.com/api/character/1"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let mut url = Url::parse(s).map_err(|e| InvalidUrlError::new(s, e.to_string()))?;

        Self::validate(&url, s)?;

        // Normalize: no trailing slash, no query or fragment
        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        Ok(Self(url))
    }

    /// Returns the base URL as a string, without a trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Appends percent-encoded path segments to the base path.
    pub fn join<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url, Error> {
        let mut url = self.0.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| InvalidUrlError::new(self.as_str(), "cannot be a base URL"))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment.as_ref());
            }
        }
        Ok(url)
    }

    /// Returns the path segments of `url` that follow the base path, or
    /// `None` if `url` does not live under this base.
    pub fn relative_segments<'a>(&self, url: &'a Url) -> Option<Vec<&'a str>> {
        if url.scheme() != self.0.scheme()
            || url.host_str() != self.0.host_str()
            || url.port_or_known_default() != self.0.port_or_known_default()
        {
            return None;
        }

        let base_path = self.0.path().trim_end_matches('/');
        let rest = url.path().strip_prefix(base_path)?;
        let rest = rest.strip_prefix('/')?;

        Some(rest.split('/').filter(|s| !s.is_empty()).collect())
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidUrlError::new(original, "must be an absolute URL").into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidUrlError::new(
                original,
                "must use HTTPS (HTTP allowed only for localhost)",
            )
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidUrlError::new(original, "must have a host").into());
        }

        Ok(())
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_API_URL).expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
