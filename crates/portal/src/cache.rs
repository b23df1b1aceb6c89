//! In-memory response cache.
//!
//! The cache stores raw response bytes, partitioned by endpoint and keyed by
//! the resolved absolute URL. It is an optimization only: every operation is
//! infallible and a missing partition simply behaves as a miss.
//!
//! Each partition is bounded. When a partition is full, the oldest inserted
//! entry is evicted first (FIFO). Overwriting an existing key keeps its
//! original position.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use bytes::Bytes;
use tracing::trace;

use crate::types::EndpointKind;

/// Default number of responses kept per endpoint.
pub const DEFAULT_CAPACITY: usize = 256;

/// A bounded, per-endpoint cache of response bodies.
#[derive(Debug)]
pub struct ResponseCache {
    partitions: HashMap<EndpointKind, Mutex<Partition>>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct Partition {
    entries: HashMap<String, Bytes>,
    order: VecDeque<String>,
}

impl ResponseCache {
    /// Create a cache holding at most `capacity` responses per endpoint.
    ///
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize) -> Self {
        let partitions = EndpointKind::ALL
            .into_iter()
            .map(|kind| (kind, Mutex::new(Partition::default())))
            .collect();

        Self {
            partitions,
            capacity,
        }
    }

    /// Returns the per-endpoint capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Look up the cached body for `key` in the `endpoint` partition.
    pub fn get(&self, endpoint: EndpointKind, key: &str) -> Option<Bytes> {
        let partition = self.partitions.get(&endpoint)?;
        let partition = partition.lock().unwrap();
        partition.entries.get(key).cloned()
    }

    /// Store `body` for `key` in the `endpoint` partition.
    pub fn put(&self, endpoint: EndpointKind, key: &str, body: Bytes) {
        if self.capacity == 0 {
            return;
        }
        let Some(partition) = self.partitions.get(&endpoint) else {
            return;
        };
        let mut partition = partition.lock().unwrap();

        if let Some(existing) = partition.entries.get_mut(key) {
            *existing = body;
            return;
        }

        while partition.order.len() >= self.capacity {
            if let Some(evicted) = partition.order.pop_front() {
                trace!(%endpoint, key = %evicted, "evicting cached response");
                partition.entries.remove(&evicted);
            }
        }

        partition.order.push_back(key.to_string());
        partition.entries.insert(key.to_string(), body);
    }

    /// Returns true if `key` is cached in the `endpoint` partition.
    pub fn contains(&self, endpoint: EndpointKind, key: &str) -> bool {
        self.partitions
            .get(&endpoint)
            .is_some_and(|p| p.lock().unwrap().entries.contains_key(key))
    }

    /// Returns the number of cached responses for `endpoint`.
    pub fn len(&self, endpoint: EndpointKind) -> usize {
        self.partitions
            .get(&endpoint)
            .map_or(0, |p| p.lock().unwrap().entries.len())
    }

    /// Returns true if no endpoint has a cached response.
    pub fn is_empty(&self) -> bool {
        EndpointKind::ALL.into_iter().all(|kind| self.len(kind) == 0)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
