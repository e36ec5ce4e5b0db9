//! Status view-model for lifecycle lists (rentals, donations).
//!
//! Holds the last list fetched for the signed-in actor, the notice shown above
//! it and the set of ids with a transition in flight. The server stays the
//! only source of truth: a successful transition is followed by one re-read
//! of the list, never by a local status write.

use std::collections::HashSet;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard,
};

use crate::{
    api::LifecycleEndpoint,
    error::{ClientError, ClientResult},
    lifecycle::{LifecycleEntity, Scope, TransitionAction, UpdatePolicy},
    models::enums::Role,
};

type Entity<E> = <E as LifecycleEndpoint>::Entity;
type Status<E> = <Entity<E> as LifecycleEntity>::Status;
type Action<E> = <Entity<E> as LifecycleEntity>::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Inline message shown near the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// What a page renders for the list
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<T> {
    /// First fetch still running
    Loading,
    /// Fetched, nothing there: show the call to action
    Empty,
    Ready(Vec<T>),
    /// Never fetched successfully
    Unavailable(String),
}

/// Client-side narrowing of a fetched list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter<S> {
    /// Case-insensitive text matched against item and store name
    pub query: String,
    pub status: Option<S>,
}

impl<S> Default for ListFilter<S> {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: None,
        }
    }
}

impl<S: Copy + Eq> ListFilter<S> {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.status.is_none()
    }

    pub fn matches<T: LifecycleEntity<Status = S>>(&self, entity: &T) -> bool {
        if let Some(status) = self.status {
            if entity.status() != status {
                return false;
            }
        }
        let query = self.query.trim().to_lowercase();
        query.is_empty()
            || entity.item_name().to_lowercase().contains(&query)
            || entity.store_name().to_lowercase().contains(&query)
    }
}

/// Entities of `items` accepted by `filter`, in their original order
pub fn apply_filter<T: LifecycleEntity>(items: &[T], filter: &ListFilter<T::Status>) -> Vec<T> {
    items
        .iter()
        .filter(|item| filter.matches(*item))
        .cloned()
        .collect()
}

struct ListState<T> {
    items: Option<Vec<T>>,
    loading: bool,
    scope: Option<Scope>,
    notice: Option<Notice>,
    /// Ticket of the most recently started fetch
    fetch_seq: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: None,
            loading: false,
            scope: None,
            notice: None,
            fetch_seq: 0,
        }
    }
}

impl<T> ListState<T> {
    fn begin_fetch(&mut self, scope: Scope) -> u64 {
        self.fetch_seq += 1;
        self.loading = true;
        self.scope = Some(scope);
        self.fetch_seq
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.fetch_seq == ticket
    }
}

/// Marks an id busy for as long as it lives
struct InFlightGuard {
    ids: Arc<Mutex<HashSet<i64>>>,
    id: i64,
}

impl InFlightGuard {
    fn acquire(ids: &Arc<Mutex<HashSet<i64>>>, id: i64) -> Option<Self> {
        let inserted = lock(ids).insert(id);
        inserted.then(|| Self {
            ids: Arc::clone(ids),
            id,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.ids).remove(&self.id);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct StatusViewModel<E: LifecycleEndpoint> {
    endpoint: Arc<E>,
    viewer: Role,
    state: Arc<Mutex<ListState<Entity<E>>>>,
    in_flight: Arc<Mutex<HashSet<i64>>>,
    alive: Arc<AtomicBool>,
}

impl<E: LifecycleEndpoint> Clone for StatusViewModel<E> {
    fn clone(&self) -> Self {
        Self {
            endpoint: Arc::clone(&self.endpoint),
            viewer: self.viewer,
            state: Arc::clone(&self.state),
            in_flight: Arc::clone(&self.in_flight),
            alive: Arc::clone(&self.alive),
        }
    }
}

impl<E: LifecycleEndpoint> StatusViewModel<E> {
    pub fn new(endpoint: E, viewer: Role) -> Self {
        Self::with_shared(Arc::new(endpoint), viewer)
    }

    pub fn with_shared(endpoint: Arc<E>, viewer: Role) -> Self {
        Self {
            endpoint,
            viewer,
            state: Arc::new(Mutex::new(ListState::default())),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn viewer(&self) -> Role {
        self.viewer
    }

    /// Scope this viewer reads by default
    pub fn default_scope(&self) -> Scope {
        Scope::for_role(self.viewer)
    }

    /// Replace the cached list with the server's list for `scope`.
    ///
    /// On failure the previous list is kept and an error notice is set. A
    /// response is discarded when a newer fetch started while it was in
    /// flight.
    pub async fn fetch(&self, scope: Scope) -> ClientResult<usize> {
        let ticket = lock(&self.state).begin_fetch(scope);

        let result = self.endpoint.list(scope).await;

        let mut state = lock(&self.state);
        if !state.is_latest(ticket) {
            tracing::debug!(
                "Discarding superseded {} fetch #{}",
                self.endpoint.resource_name(),
                ticket
            );
            return result.map(|items| items.len());
        }
        state.loading = false;

        if !self.is_alive() {
            tracing::debug!("Dropping {} fetched after dispose", self.endpoint.resource_name());
            return result.map(|items| items.len());
        }

        match result {
            Ok(items) => {
                let count = items.len();
                tracing::debug!("Loaded {} {}", count, self.endpoint.resource_name());
                state.items = Some(items);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", self.endpoint.resource_name(), e);
                state.notice = Some(Notice::error(format!(
                    "Failed to load {}.",
                    self.endpoint.resource_name()
                )));
                Err(e)
            }
        }
    }

    /// Re-read the last fetched scope
    pub async fn refresh(&self) -> ClientResult<usize> {
        let scope = lock(&self.state).scope.unwrap_or_else(|| self.default_scope());
        self.fetch(scope).await
    }

    /// Ask the server to apply `action` to entity `id`, then re-read the list once.
    ///
    /// A second request for an id whose first request has not settled is
    /// refused with [`ClientError::Busy`].
    pub async fn request_transition(&self, id: i64, action: Action<E>) -> ClientResult<()> {
        if action.request(id).is_none() {
            return Err(ClientError::BadRequest(format!(
                "\"{}\" is not a status transition",
                action.label()
            )));
        }

        let _guard = InFlightGuard::acquire(&self.in_flight, id).ok_or_else(|| {
            ClientError::Busy(format!("{} #{} is already being updated", self.endpoint.resource_name(), id))
        })?;

        match self.endpoint.transition(id, action).await {
            Ok(_) => {
                if !self.is_alive() {
                    return Ok(());
                }
                tracing::info!("{:?} applied to #{}", action, id);
                self.set_notice(Notice::success(action.success_message()));
                if action.policy() == UpdatePolicy::RefetchRequired {
                    if let Err(e) = self.refresh().await {
                        tracing::warn!("Refetch after {:?} on #{} failed: {}", action, id, e);
                    }
                }
                Ok(())
            }
            Err(e) => {
                if self.is_alive() {
                    self.set_notice(Notice::error(e.user_message(action.failure_message())));
                }
                Err(e)
            }
        }
    }

    pub fn is_in_flight(&self, id: i64) -> bool {
        lock(&self.in_flight).contains(&id)
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Full cached list, empty before the first successful fetch
    pub fn items(&self) -> Vec<Entity<E>> {
        lock(&self.state).items.clone().unwrap_or_default()
    }

    pub fn get(&self, id: i64) -> Option<Entity<E>> {
        lock(&self.state)
            .items
            .as_ref()
            .and_then(|items| items.iter().find(|item| item.id() == id).cloned())
    }

    /// Affordances for entity `id`; none for unknown ids
    pub fn actions(&self, id: i64) -> Vec<Action<E>> {
        self.get(id)
            .map(|item| item.actions_for(self.viewer))
            .unwrap_or_default()
    }

    pub fn filter(&self, filter: &ListFilter<Status<E>>) -> Vec<Entity<E>> {
        let state = lock(&self.state);
        match &state.items {
            Some(items) => apply_filter(items, filter),
            None => Vec::new(),
        }
    }

    pub fn count_with_status(&self, status: Status<E>) -> usize {
        lock(&self.state)
            .items
            .as_ref()
            .map(|items| items.iter().filter(|item| item.status() == status).count())
            .unwrap_or(0)
    }

    pub fn view(&self) -> ListView<Entity<E>> {
        let state = lock(&self.state);
        match &state.items {
            Some(items) if items.is_empty() => ListView::Empty,
            Some(items) => ListView::Ready(items.clone()),
            None if state.loading => ListView::Loading,
            None => ListView::Unavailable(
                state
                    .notice
                    .as_ref()
                    .filter(|n| n.kind == NoticeKind::Error)
                    .map(|n| n.text.clone())
                    .unwrap_or_else(|| format!("No {} loaded yet.", self.endpoint.resource_name())),
            ),
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        lock(&self.state).notice.clone()
    }

    /// Read and dismiss the current notice
    pub fn take_notice(&self) -> Option<Notice> {
        lock(&self.state).notice.take()
    }

    fn set_notice(&self, notice: Notice) {
        lock(&self.state).notice = Some(notice);
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Tear down: requests resolving afterwards no longer touch state
    pub fn dispose(&self) {
        self.alive.store(false, Ordering::Release);
    }
}
