//! Incremental list loading.
//!
//! A [`Paginator`] loads the first page of a listing, then follows the
//! server's `next` links one page at a time. Each successful load produces a
//! [`PageEvent`] describing exactly which positions changed, so a consumer
//! can update incrementally instead of redrawing the whole list.
//!
//! The absence of `next` in the last envelope is the only end-of-list signal.

use std::ops::Range;
use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::client::ApiClient;
use crate::models::{Page, PageInfo};
use crate::request::Request;

/// What the paginator is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingFirst,
    LoadingMore,
}

/// The outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The first page replaced the list; it now holds `count` items.
    Loaded { count: usize },
    /// A further page was appended at `range`.
    Appended { range: Range<usize> },
}

/// A pagination controller over one listing.
///
/// Safe to share between tasks (wrap it in an `Arc`). Only one load runs at
/// a time: a second call while a load is in flight returns `Ok(None)`
/// without touching the network.
///
/// # Example
///
/// ```no_run
/// use portal::{ApiClient, Character, ClientConfig, PageEvent};
///
/// # async fn example() -> Result<(), portal::Error> {
/// let client = ApiClient::new(ClientConfig::default())?;
/// let characters = client.paginator::<Character>();
///
/// characters.load_first().await?;
/// while characters.should_show_more() {
///     if let Some(PageEvent::Appended { range }) = characters.load_more().await? {
///         println!("rows {range:?} arrived");
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Paginator<T> {
    client: ApiClient,
    request: Request,
    state: Mutex<State<T>>,
    events: Option<mpsc::UnboundedSender<PageEvent>>,
}

#[derive(Debug)]
struct State<T> {
    phase: Phase,
    items: Vec<T>,
    info: Option<PageInfo>,
}

impl<T> Paginator<T>
where
    T: serde::de::DeserializeOwned,
{
    /// Create a paginator whose first page is `request`.
    pub fn new(client: ApiClient, request: Request) -> Self {
        Self {
            client,
            request,
            state: Mutex::new(State {
                phase: Phase::Idle,
                items: Vec::new(),
                info: None,
            }),
            events: None,
        }
    }

    /// Also report every successful load on `events`.
    ///
    /// A dropped receiver is ignored; the paginator does not keep the
    /// listener alive.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<PageEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Load the first page, replacing anything loaded before.
    ///
    /// Returns `Ok(None)` if another load is already in flight.
    #[instrument(skip(self), fields(request = %self.request))]
    pub async fn load_first(&self) -> Result<Option<PageEvent>> {
        let Some(claim) = self.begin(Phase::LoadingFirst) else {
            debug!("load already in flight");
            return Ok(None);
        };

        let result = self.client.execute::<Page<T>>(&self.request).await;

        let event = {
            let mut state = self.state.lock().unwrap();
            match result {
                Ok(page) => {
                    state.items = page.results;
                    state.info = Some(page.info);
                    PageEvent::Loaded {
                        count: state.items.len(),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to load first page");
                    return Err(e);
                }
            }
        };
        drop(claim);

        self.notify(&event);
        Ok(Some(event))
    }

    /// Load the page after the last one loaded and append it.
    ///
    /// Returns `Ok(None)` when there is no `next` link or a load is already
    /// in flight. On failure the loaded items are left untouched.
    #[instrument(skip(self), fields(request = %self.request))]
    pub async fn load_more(&self) -> Result<Option<PageEvent>> {
        let (next, claim) = {
            let mut state = self.state.lock().unwrap();
            let next = match (state.phase, state.info.as_ref().and_then(|i| i.next.clone())) {
                (Phase::Idle, Some(next)) => next,
                _ => return Ok(None),
            };
            state.phase = Phase::LoadingMore;
            (next, Claim { state: &self.state })
        };

        let result = match Request::from_url(&next) {
            Ok(request) => self.client.execute::<Page<T>>(&request).await,
            Err(e) => Err(e),
        };

        let event = {
            let mut state = self.state.lock().unwrap();
            match result {
                Ok(page) => {
                    let start = state.items.len();
                    let end = start + page.results.len();
                    state.items.extend(page.results);
                    state.info = Some(page.info);
                    PageEvent::Appended { range: start..end }
                }
                Err(e) => {
                    warn!(error = %e, next = %next, "failed to load more");
                    return Err(e);
                }
            }
        };
        drop(claim);

        self.notify(&event);
        Ok(Some(event))
    }

    /// True once a loaded envelope advertises a `next` page.
    pub fn should_show_more(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .info
            .as_ref()
            .is_some_and(PageInfo::has_next)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.state.lock().unwrap().phase
    }

    /// Returns the number of loaded items.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    /// Returns true if nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the last pagination envelope received.
    pub fn info(&self) -> Option<PageInfo> {
        self.state.lock().unwrap().info.clone()
    }

    /// Runs `f` against the loaded items without copying them.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.state.lock().unwrap().items)
    }

    /// Returns a copy of the loaded items.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.with_items(<[T]>::to_vec)
    }

    /// Atomically moves from `Idle` to `phase`.
    fn begin(&self, phase: Phase) -> Option<Claim<'_, T>> {
        let mut state = self.state.lock().unwrap();
        if state.phase != Phase::Idle {
            return None;
        }
        state.phase = phase;
        Some(Claim { state: &self.state })
    }

    fn notify(&self, event: &PageEvent) {
        if let Some(events) = &self.events {
            // A closed receiver just means nobody is listening
            let _ = events.send(event.clone());
        }
    }
}

/// A load in flight. Dropping it returns the paginator to `Idle`, including
/// when the load future itself is dropped before completing.
struct Claim<'a, T> {
    state: &'a Mutex<State<T>>,
}

impl<T> Drop for Claim<'_, T> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.phase = Phase::Idle;
    }
}
