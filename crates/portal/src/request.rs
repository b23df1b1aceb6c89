//! Request description and URL resolution.

use std::fmt;

use url::Url;

use crate::Result;
use crate::error::InvalidUrlError;
use crate::types::{ApiUrl, EndpointKind};

/// What a [`Request`] points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestTarget {
    /// A canonical endpoint, resolved against the API base.
    Endpoint(EndpointKind),
    /// An absolute URL handed out by the server, used verbatim.
    Url(Url),
}

/// An immutable description of one HTTP GET.
///
/// Requests are built once, either from an [`EndpointKind`] plus optional
/// path segments and query items, or from an absolute URL such as a
/// pagination `next` link or a cross reference.
///
/// # Example
///
/// ```
/// use portal::{ApiUrl, EndpointKind, Request};
///
/// let api = ApiUrl::default();
/// let request = Request::new(EndpointKind::Character)
///     .query("status", "alive")
///     .query("name", "rick");
///
/// let resolved = request.resolve(&api).unwrap();
/// assert_eq!(
///     resolved.cache_key(),
///     "https://rickandmortyapi.com/api/character?name=rick&status=alive"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    target: RequestTarget,
    path: Vec<String>,
    query: Vec<(String, String)>,
}

impl Request {
    /// A request for an endpoint's base path.
    pub fn new(endpoint: EndpointKind) -> Self {
        Self {
            target: RequestTarget::Endpoint(endpoint),
            path: Vec::new(),
            query: Vec::new(),
        }
    }

    /// The first page of an endpoint's listing.
    pub fn list(endpoint: EndpointKind) -> Self {
        Self::new(endpoint)
    }

    /// A single item of an endpoint by id.
    pub fn item(endpoint: EndpointKind, id: u32) -> Self {
        Self::new(endpoint).path(id.to_string())
    }

    /// A page of an endpoint's listing.
    pub fn page(endpoint: EndpointKind, page: u32) -> Self {
        Self::new(endpoint).query("page", page.to_string())
    }

    /// A request for an absolute URL, used verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`](crate::Error::InvalidUrl) if `url` is not
    /// an absolute `http` or `https` URL.
    pub fn from_url(url: impl AsRef<str>) -> Result<Self> {
        let raw = url.as_ref();
        let url = Url::parse(raw).map_err(|e| InvalidUrlError::new(raw, e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(InvalidUrlError::new(raw, "expected an absolute http(s) URL").into());
        }

        Ok(Self {
            target: RequestTarget::Url(url),
            path: Vec::new(),
            query: Vec::new(),
        })
    }

    /// Appends a path segment. Ignored for URL targets.
    #[must_use]
    pub fn path(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }

    /// Appends a query item. Ignored for URL targets.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Returns the target of this request.
    pub fn target(&self) -> &RequestTarget {
        &self.target
    }

    /// Returns the endpoint if this request was built from one.
    pub fn endpoint(&self) -> Option<EndpointKind> {
        match self.target {
            RequestTarget::Endpoint(kind) => Some(kind),
            RequestTarget::Url(_) => None,
        }
    }

    /// Resolves this request into an absolute URL and its cache partition.
    ///
    /// Query items are ordered by name (stable for repeated names) so that
    /// equivalent requests produce identical cache keys.
    pub fn resolve(&self, base: &ApiUrl) -> Result<ResolvedRequest> {
        match &self.target {
            RequestTarget::Endpoint(kind) => {
                let mut segments = Vec::with_capacity(self.path.len() + 1);
                segments.push(kind.path());
                segments.extend(self.path.iter().map(String::as_str));

                let mut url = base.join(&segments)?;

                if !self.query.is_empty() {
                    let mut query: Vec<&(String, String)> = self.query.iter().collect();
                    query.sort_by(|a, b| a.0.cmp(&b.0));
                    url.query_pairs_mut().extend_pairs(query);
                }

                Ok(ResolvedRequest {
                    endpoint: Some(*kind),
                    key: canonical_key(&url),
                    url,
                })
            }
            RequestTarget::Url(url) => Ok(ResolvedRequest {
                endpoint: EndpointKind::from_url(base, url),
                key: canonical_key(url),
                url: url.clone(),
            }),
        }
    }
}

/// The cache key for `url`: query items sorted by name (stable for repeated
/// names) and no trailing slash on the path. The URL itself is fetched as is.
fn canonical_key(url: &Url) -> String {
    let mut canonical = url.clone();
    canonical.set_fragment(None);

    let path = canonical.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        canonical.set_path(&trimmed);
    }

    let mut query: Vec<(String, String)> = canonical.query_pairs().into_owned().collect();
    if query.is_empty() {
        canonical.set_query(None);
    } else {
        query.sort_by(|a, b| a.0.cmp(&b.0));
        canonical.query_pairs_mut().clear().extend_pairs(query);
    }

    canonical.into()
}

impl From<EndpointKind> for Request {
    fn from(endpoint: EndpointKind) -> Self {
        Self::new(endpoint)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            RequestTarget::Url(url) => write!(f, "{url}"),
            RequestTarget::Endpoint(kind) => {
                write!(f, "/{kind}")?;
                for segment in &self.path {
                    write!(f, "/{segment}")?;
                }
                for (i, (name, value)) in self.query.iter().enumerate() {
                    let sep = if i == 0 { '?' } else { '&' };
                    write!(f, "{sep}{name}={value}")?;
                }
                Ok(())
            }
        }
    }
}

/// A request resolved against an API base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRequest {
    endpoint: Option<EndpointKind>,
    url: Url,
    key: String,
}

impl ResolvedRequest {
    /// The cache partition, if the URL belongs to a known endpoint.
    pub fn endpoint(&self) -> Option<EndpointKind> {
        self.endpoint
    }

    /// The absolute URL to fetch.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The cache key: the absolute URL in canonical form.
    pub fn cache_key(&self) -> &str {
        &self.key
    }
}
