//! Image byte fetching.
//!
//! Entity records carry image URLs (a character's `image`, for example) but
//! the image bytes are not part of the JSON API. [`ImageSource`] is the seam
//! presentation code fetches them through; [`HttpImageSource`] is the plain
//! network implementation. Nothing here is cached.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::instrument;
use url::Url;

use crate::Result;
use crate::error::InvalidUrlError;
use crate::http::HttpClient;

/// A source of raw image bytes addressed by URL.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Download the image at `url`.
    async fn fetch(&self, url: &str) -> Result<Bytes>;
}

/// Fetches images over HTTP.
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    http: HttpClient,
}

impl HttpImageSource {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Bytes> {
        let parsed = Url::parse(url).map_err(|e| InvalidUrlError::new(url, e.to_string()))?;
        self.http.get_bytes(&parsed).await
    }
}
