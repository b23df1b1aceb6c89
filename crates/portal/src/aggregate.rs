//! Concurrent resolution of cross references.
//!
//! Entities refer to each other by URL. An [`Aggregator`] takes a list of
//! such URLs, fetches them all at once and joins the results into a single
//! [`Joined`] value. The join always completes: references that fail to
//! parse or fetch are reported in [`Joined::failures`] and never abort the
//! others.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tokio::sync::oneshot;
use tokio::task::{self, JoinSet};
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::References;
use crate::request::Request;

/// A reference that could not be resolved.
#[derive(Debug)]
pub struct ReferenceFailure {
    /// The URL as it appeared in the parent entity.
    pub reference: String,
    /// Why it failed.
    pub error: Error,
}

/// The joined outcome of a fan-out.
///
/// `items` are in completion order, not in the order the references were
/// listed.
#[derive(Debug)]
pub struct Joined<T> {
    /// Successfully decoded entities.
    pub items: Vec<T>,
    /// References that were dropped, with the reason.
    pub failures: Vec<ReferenceFailure>,
    /// Number of requests actually sent (references that parsed).
    pub dispatched: usize,
}

impl<T> Joined<T> {
    /// Returns true if every reference resolved.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A parent entity together with the entities it refers to.
#[derive(Debug)]
pub struct Expanded<P, R> {
    pub parent: P,
    pub related: Joined<R>,
}

/// Fans requests out over an [`ApiClient`] and joins the results.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: ApiClient,
}

impl Aggregator {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch every reference concurrently and wait for all of them.
    ///
    /// Unparsable references are never sent. Each sent request counts as done
    /// when it succeeds or fails; the join returns once all of them are done.
    #[instrument(skip(self, references), fields(references = references.len()))]
    pub async fn join<T>(&self, references: &[String]) -> Joined<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let mut failures = Vec::new();
        let mut tasks = JoinSet::new();
        let mut pending: HashMap<task::Id, String> = HashMap::new();

        for reference in references {
            let request = match Request::from_url(reference) {
                Ok(request) => request,
                Err(error) => {
                    debug!(%reference, %error, "dropping unparsable reference");
                    failures.push(ReferenceFailure {
                        reference: reference.clone(),
                        error,
                    });
                    continue;
                }
            };

            let client = self.client.clone();
            let handle = tasks.spawn(async move { client.execute::<T>(&request).await });
            pending.insert(handle.id(), reference.clone());
        }

        let dispatched = tasks.len();
        let mut items = Vec::with_capacity(dispatched);

        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) => (e.id(), Err(Error::Task { message: e.to_string() })),
            };
            let Some(reference) = pending.remove(&id) else {
                continue;
            };
            match result {
                Ok(item) => items.push(item),
                Err(error) => {
                    warn!(%reference, %error, "reference failed to resolve");
                    failures.push(ReferenceFailure { reference, error });
                }
            }
        }

        debug!(
            dispatched,
            resolved = items.len(),
            failed = failures.len(),
            "fan-out joined"
        );

        Joined {
            items,
            failures,
            dispatched,
        }
    }

    /// Run [`join`](Self::join) in the background.
    ///
    /// The joined value arrives once on the returned receiver, whichever
    /// worker finishes last. Dropping the receiver does not cancel the
    /// requests; their result is discarded.
    pub fn spawn_join<T>(&self, references: Vec<String>) -> oneshot::Receiver<Joined<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let aggregator = self.clone();
        tokio::spawn(async move {
            let joined = aggregator.join::<T>(&references).await;
            let _ = tx.send(joined);
        });
        rx
    }

    /// Fetch a parent entity, then resolve all of its references.
    ///
    /// # Errors
    ///
    /// Fails only if the parent itself cannot be fetched; failed references
    /// are reported in [`Expanded::related`].
    pub async fn expand<P, R>(&self, request: &Request) -> Result<Expanded<P, R>>
    where
        P: DeserializeOwned + References,
        R: DeserializeOwned + Send + 'static,
    {
        let parent: P = self.client.execute(request).await?;
        let related = self.join::<R>(parent.references()).await;
        Ok(Expanded { parent, related })
    }
}
