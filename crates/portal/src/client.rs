//! Cached request executor.

use std::any::type_name;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::Result;
use crate::aggregate::Aggregator;
use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::error::DecodeError;
use crate::http::HttpClient;
use crate::models::{Page, Resource};
use crate::pagination::Paginator;
use crate::request::Request;
use crate::types::ApiUrl;

/// A client for the API.
///
/// Turns a [`Request`] into a decoded value, serving repeated URLs from an
/// in-memory [`ResponseCache`]. Construct one at startup and hand clones to
/// whatever needs it; clones share the same cache and connection pool.
///
/// # Example
///
/// ```no_run
/// use portal::{ApiClient, Character, ClientConfig};
///
/// # async fn example() -> Result<(), portal::Error> {
/// let client = ApiClient::new(ClientConfig::default())?;
/// let rick: Character = client.get(1).await?;
/// println!("{} is {}", rick.name, rick.status_text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    base: ApiUrl,
    http: HttpClient,
    cache: ResponseCache,
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                base: config.base_url,
                http,
                cache: ResponseCache::new(config.cache_capacity),
            }),
        })
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &ApiUrl {
        &self.inner.base
    }

    /// Returns the shared response cache.
    pub fn cache(&self) -> &ResponseCache {
        &self.inner.cache
    }

    /// Returns the underlying HTTP transport.
    pub fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    /// Execute `request` and decode the body as `T`.
    ///
    /// Cached bodies are decoded exactly like fresh ones, so callers cannot
    /// tell a hit from a network response. Bodies are cached only after they
    /// decode; transport and decode failures never touch the cache.
    #[instrument(skip(self, request), fields(request = %request, target = type_name::<T>()))]
    pub async fn execute<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let resolved = request.resolve(&self.inner.base)?;
        let url = resolved.url();
        let key = resolved.cache_key();

        if let Some(endpoint) = resolved.endpoint()
            && let Some(body) = self.inner.cache.get(endpoint, key)
        {
            debug!(%endpoint, "cache hit");
            return decode(key, &body);
        }

        debug!(endpoint = ?resolved.endpoint(), "cache miss");

        let body = self.inner.http.get_bytes(url).await?;
        let value = decode(key, &body)?;

        if let Some(endpoint) = resolved.endpoint() {
            debug!(%endpoint, bytes = body.len(), "caching response");
            self.inner.cache.put(endpoint, key, body);
        }

        Ok(value)
    }

    /// Execute `request` in the background and hand the result to `on_complete`.
    ///
    /// The callback runs on a runtime worker, not on the caller's task. The
    /// client holds no reference to the callback's owner beyond the closure.
    pub fn spawn_execute<T, F>(&self, request: Request, on_complete: F) -> JoinHandle<()>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<T>) + Send + 'static,
    {
        let client = self.clone();
        tokio::spawn(async move {
            let result = client.execute::<T>(&request).await;
            on_complete(result);
        })
    }

    /// Fetch a single entity by id.
    pub async fn get<R: Resource>(&self, id: u32) -> Result<R> {
        self.execute(&Request::item(R::ENDPOINT, id)).await
    }

    /// Fetch the first page of an entity listing.
    pub async fn list<R: Resource>(&self) -> Result<Page<R>> {
        self.execute(&Request::list(R::ENDPOINT)).await
    }

    /// Fetch a numbered page of an entity listing.
    pub async fn page<R: Resource>(&self, page: u32) -> Result<Page<R>> {
        self.execute(&Request::page(R::ENDPOINT, page)).await
    }

    /// Fetch the first page of a filtered listing, e.g. `[("name", "rick")]`.
    pub async fn filter<R: Resource>(&self, filters: &[(&str, &str)]) -> Result<Page<R>> {
        let request = filters
            .iter()
            .fold(Request::list(R::ENDPOINT), |request, (name, value)| {
                request.query(*name, *value)
            });
        self.execute(&request).await
    }

    /// Fetch an absolute URL handed out by the server.
    pub async fn follow<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.execute(&Request::from_url(url)?).await
    }

    /// A pagination controller over the listing of `R`.
    pub fn paginator<R: Resource>(&self) -> Paginator<R> {
        Paginator::new(self.clone(), Request::list(R::ENDPOINT))
    }

    /// A fan-out resolver for cross references.
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.clone())
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| {
        DecodeError {
            url: url.to_string(),
            target: type_name::<T>(),
            source,
        }
        .into()
    })
}
