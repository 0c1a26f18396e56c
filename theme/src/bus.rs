//! In-process publish/subscribe channel for theme changes.
//!
//! DESIGN
//! ======
//! Handlers run synchronously, in registration order, on the thread that
//! committed the change. A publish issued from inside a handler is queued and
//! delivered only after the in-flight notification has reached every handler,
//! so commits are always observed in order. No lock is held while a handler
//! runs.
//!
//! Handlers report faults by returning [`HandlerError`]; a fault is logged and
//! delivery moves on to the next handler. Panics are also caught where the
//! target unwinds, but browser builds abort on panic, so a handler that can
//! fail must return its error instead.
//!
//! The bus also remembers the last value it published. `reconcile` compares
//! that against the live projection and republishes when something outside
//! the bus (another toggle, a stray script) has rewritten the marker.

use std::collections::VecDeque;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};

use crate::projection::ThemeProjection;

#[cfg(test)]
#[path = "bus_test.rs"]
mod bus_test;

/// Why a change was published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeOrigin {
    /// A deliberate user toggle.
    Commit,
    /// Drift correction or re-resolution; not a new user action.
    Reconcile,
}

/// Payload delivered to subscribers and broadcast as the event detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeChange {
    pub is_dark: bool,
    pub origin: ChangeOrigin,
}

/// Monotonic id of a committed user action. Zero means "none yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Fault reported by a subscriber. Delivery to other subscribers continues.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("subscriber could not apply change: {0}")]
    Rejected(String),
    #[error("subscriber target is no longer available")]
    Detached,
}

type Handler = Arc<dyn Fn(&ThemeChange) -> Result<(), HandlerError> + Send + Sync>;

struct BusState {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
    last_known: bool,
    latest_commit: CommitId,
    published: u64,
    pending: VecDeque<ThemeChange>,
    delivering: bool,
}

struct BusInner {
    projection: Arc<dyn ThemeProjection>,
    state: Mutex<BusState>,
}

/// Session-wide theme channel. Cheap to clone; clones share one registry.
#[derive(Clone)]
pub struct ThemeBus {
    inner: Arc<BusInner>,
}

/// Registration handle returned by [`ThemeBus::subscribe`].
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`]
/// or use [`crate::ThemeConsumer`] for scoped registrations.
#[derive(Clone, Debug)]
pub struct Subscription {
    id: SubscriptionId,
    bus: Weak<BusInner>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the handler. Later calls are no-ops.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.bus.upgrade() {
            ThemeBus { inner }.remove(self.id);
        }
    }
}

impl ThemeBus {
    /// Create a bus observing `projection`; its current value seeds `last_known`.
    pub fn new(projection: Arc<dyn ThemeProjection>) -> Self {
        let last_known = projection.is_dark();
        Self {
            inner: Arc::new(BusInner {
                projection,
                state: Mutex::new(BusState {
                    handlers: Vec::new(),
                    next_id: 1,
                    last_known,
                    latest_commit: CommitId::default(),
                    published: 0,
                    pending: VecDeque::new(),
                    delivering: false,
                }),
            }),
        }
    }

    /// Register `handler` for every subsequent change.
    pub fn subscribe(
        &self,
        handler: impl Fn(&ThemeChange) -> Result<(), HandlerError> + Send + Sync + 'static,
    ) -> Subscription {
        let mut state = self.lock();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.handlers.push((id, Arc::new(handler)));
        Subscription { id, bus: Arc::downgrade(&self.inner) }
    }

    /// Remove a registration. Idempotent.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.remove(subscription.id);
    }

    /// Publish a committed user change. Call only after the store and the
    /// projection both hold `is_dark`.
    pub fn publish(&self, is_dark: bool) -> CommitId {
        let commit = {
            let mut state = self.lock();
            state.latest_commit = CommitId(state.latest_commit.0 + 1);
            state.last_known = is_dark;
            state.pending.push_back(ThemeChange { is_dark, origin: ChangeOrigin::Commit });
            state.latest_commit
        };
        self.drain();
        commit
    }

    /// Publish a correction without opening a new commit.
    pub fn republish(&self, is_dark: bool) {
        {
            let mut state = self.lock();
            state.last_known = is_dark;
            state.pending.push_back(ThemeChange { is_dark, origin: ChangeOrigin::Reconcile });
        }
        self.drain();
    }

    /// Compare the live projection with the last published value and
    /// republish on drift. Returns whether a republish happened.
    pub fn reconcile(&self) -> bool {
        let observed = self.inner.projection.is_dark();
        {
            let state = self.lock();
            if state.last_known == observed {
                return false;
            }
        }
        log::debug!("theme projection drifted to dark={observed}, republishing");
        self.republish(observed);
        true
    }

    /// Current value of the observed projection.
    #[must_use]
    pub fn projection_is_dark(&self) -> bool {
        self.inner.projection.is_dark()
    }

    #[must_use]
    pub fn last_known(&self) -> bool {
        self.lock().last_known
    }

    #[must_use]
    pub fn latest_commit(&self) -> CommitId {
        self.lock().latest_commit
    }

    /// Notifications started so far, commits and corrections alike.
    #[must_use]
    pub fn published_count(&self) -> u64 {
        self.lock().published
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().handlers.len()
    }

    fn remove(&self, id: SubscriptionId) {
        self.lock().handlers.retain(|(existing, _)| *existing != id);
    }

    fn drain(&self) {
        {
            let mut state = self.lock();
            if state.delivering {
                // The outer drain loop picks the queued change up.
                return;
            }
            state.delivering = true;
        }

        loop {
            let (change, ids) = {
                let mut state = self.lock();
                let Some(change) = state.pending.pop_front() else {
                    state.delivering = false;
                    return;
                };
                state.published += 1;
                let ids: Vec<SubscriptionId> = state.handlers.iter().map(|(id, _)| *id).collect();
                (change, ids)
            };

            for id in ids {
                // Re-resolve each handler so an unsubscribe mid-delivery drops it.
                let handler = {
                    let state = self.lock();
                    state
                        .handlers
                        .iter()
                        .find(|(existing, _)| *existing == id)
                        .map(|(_, handler)| Arc::clone(handler))
                };
                let Some(handler) = handler else {
                    continue;
                };
                match catch_unwind(AssertUnwindSafe(|| handler(&change))) {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => log::error!("theme subscriber {} failed handling {change:?}: {err}", id.0),
                    Err(_) => log::error!("theme subscriber {} panicked handling {change:?}", id.0),
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, BusState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
