//! HTTP client implementation.

use bytes::Bytes;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::Result;
use crate::config::ClientConfig;
use crate::error::{Error, TransportError};

/// HTTP client for GET requests against the API and its asset host.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the TLS backend cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch the body of `url`.
    ///
    /// A non-success status is a [`TransportError::Status`]; a successful
    /// response with an empty body is [`Error::NoBody`].
    #[instrument(skip_all, fields(url = %url))]
    pub async fn get_bytes(&self, url: &Url) -> Result<Bytes> {
        debug!("HTTP GET");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        trace!(status = %status, "HTTP response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(Error::NoBody {
                url: url.to_string(),
            });
        }

        Ok(body)
    }
}
