//! Client configuration.

use std::env;
use std::time::Duration;

use crate::Result;
use crate::cache::DEFAULT_CAPACITY;
use crate::error::Error;
use crate::types::ApiUrl;

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "PORTAL_API_URL";

/// Environment variable overriding the per-endpoint cache capacity.
pub const ENV_CACHE_CAPACITY: &str = "PORTAL_CACHE_CAPACITY";

/// Environment variable setting a transport timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "PORTAL_TIMEOUT_SECS";

/// Settings for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL every endpoint is resolved against.
    pub base_url: ApiUrl,
    /// Responses kept per endpoint; zero disables the cache.
    pub cache_capacity: usize,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Transport-level timeout. `None` leaves it to reqwest's defaults.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: ApiUrl::default(),
            cache_capacity: DEFAULT_CAPACITY,
            user_agent: concat!("portal/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Build a configuration from defaults overridden by `PORTAL_*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORTAL_API_URL` is not a valid base URL or a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = ApiUrl::new(url)?;
        }

        if let Some(capacity) = lookup(ENV_CACHE_CAPACITY) {
            config.cache_capacity = capacity.trim().parse().map_err(|_| Error::Config {
                message: format!("{ENV_CACHE_CAPACITY} must be a number, got '{capacity}'"),
            })?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| Error::Config {
                message: format!("{ENV_TIMEOUT_SECS} must be a number, got '{secs}'"),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Use a different API base URL.
    pub fn with_base_url(mut self, base_url: ApiUrl) -> Self {
        self.base_url = base_url;
        self
    }

    /// Use a different cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set a transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, ApiUrl::default());
        assert_eq!(config.cache_capacity, DEFAULT_CAPACITY);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("portal/"));
    }

    #[test]
    fn environment_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "http://localhost:9000/api/"),
            (ENV_CACHE_CAPACITY, "8"),
            (ENV_TIMEOUT_SECS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:9000/api");
        assert_eq!(config.cache_capacity, 8);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "nope")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_CACHE_CAPACITY, "lots")])).is_err());
    }
}
