use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

use super::entry::Entry;
use super::{ArbiterStats, EntryId, MatchListener, MatchState};
use crate::location::{Listener, LocationSource, Subscription};
use crate::matcher::RouteMatcher;

type Pending = Vec<(EntryId, MatchListener)>;

#[derive(Debug, Default)]
struct ArbiterState {
    entries: Vec<Entry>,
    winner: Option<EntryId>,
    subscription: Option<Subscription>,
    next_id: u64,
    stats: ArbiterStats,
}

struct ArbiterInner {
    location: Arc<dyn LocationSource>,
    state: Mutex<ArbiterState>,
}

/// First-registered-match-wins coordinator for all routes observing one
/// location. Subscribes to the location while at least one entry is
/// registered.
#[derive(Clone)]
pub struct Arbiter {
    inner: Arc<ArbiterInner>,
}

/// Per-location handle to the location's arbiter. Holds it weakly; the
/// arbiter lives as long as some router or handle uses it.
#[derive(Debug, Default)]
pub struct ArbiterSlot {
    current: Mutex<Weak<ArbiterInner>>,
}

impl ArbiterSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_or_init(&self, init: impl FnOnce() -> Arbiter) -> Arbiter {
        let mut current = self.current.lock();
        if let Some(inner) = current.upgrade() {
            return Arbiter { inner };
        }
        let arbiter = init();
        *current = Arc::downgrade(&arbiter.inner);
        arbiter
    }
}

impl Arbiter {
    /// The arbiter of `location`, created on first use. Every caller
    /// observing the same location shares it.
    pub fn for_location(location: Arc<dyn LocationSource>) -> Self {
        let owner = Arc::clone(&location);
        owner.arbiter_slot().get_or_init(|| {
            tracing::debug!("arbiter created");
            Self {
                inner: Arc::new(ArbiterInner {
                    location,
                    state: Mutex::new(ArbiterState::default()),
                }),
            }
        })
    }

    pub fn ptr_eq(&self, other: &Arbiter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn location(&self) -> &Arc<dyn LocationSource> {
        &self.inner.location
    }

    /// Appends an entry and evaluates it against the current URL, unless an
    /// earlier entry already holds the win. Returns the entry's initial state;
    /// the listener is only called on later refreshes.
    pub fn register(
        &self,
        matcher: RouteMatcher,
        listener: MatchListener,
    ) -> (EntryId, MatchState) {
        let mut state = self.inner.state.lock();
        let url = self.inner.location.url();

        let id = EntryId(state.next_id);
        state.next_id += 1;
        state.stats.record_registration();

        let initial = if state.winner.is_none() {
            MatchState::from(matcher.exec(url.path()))
        } else {
            MatchState::Unmatched
        };
        if initial.is_matched() {
            state.winner = Some(id);
        }

        state.entries.push(Entry {
            id,
            matcher,
            listener,
            state: initial.clone(),
        });

        if state.subscription.is_none() {
            state.subscription = Some(self.subscribe());
            tracing::debug!("arbiter active");
        }
        tracing::debug!(
            entry = %id,
            matched = initial.is_matched(),
            entries = state.entries.len() as u64,
            "route registered"
        );

        (id, initial)
    }

    /// Removes an entry. Removing the winner re-arbitrates the remaining
    /// entries before returning. Returns false for unknown ids.
    pub fn deregister(&self, id: EntryId) -> bool {
        let (pending, released) = {
            let mut state = self.inner.state.lock();
            let Some(position) = state.entries.iter().position(|entry| entry.id == id) else {
                return false;
            };
            state.entries.remove(position);
            state.stats.record_deregistration();
            tracing::debug!(
                entry = %id,
                entries = state.entries.len() as u64,
                "route deregistered"
            );

            if state.entries.is_empty() {
                state.winner = None;
                tracing::debug!("arbiter idle");
                (Vec::new(), state.subscription.take())
            } else if state.winner == Some(id) {
                let url = self.inner.location.url();
                (refresh_locked(&mut state, url.path()), None)
            } else {
                (Vec::new(), None)
            }
        };
        drop(released);
        self.dispatch(pending);
        true
    }

    /// Re-evaluates every entry in registration order against the current URL.
    pub fn refresh(&self) {
        let pending = {
            let mut state = self.inner.state.lock();
            let url = self.inner.location.url();
            refresh_locked(&mut state, url.path())
        };
        self.dispatch(pending);
    }

    pub fn winner(&self) -> Option<EntryId> {
        self.inner.state.lock().winner
    }

    pub fn state(&self, id: EntryId) -> Option<MatchState> {
        self.inner
            .state
            .lock()
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.state.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the arbiter currently listens to its location.
    pub fn is_active(&self) -> bool {
        self.inner.state.lock().subscription.is_some()
    }

    pub fn stats(&self) -> ArbiterStats {
        self.inner.state.lock().stats.clone()
    }

    fn subscribe(&self) -> Subscription {
        let weak = Arc::downgrade(&self.inner);
        let listener: Listener = Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                Arbiter { inner }.refresh();
            }
        });
        self.inner.location.subscribe(listener)
    }

    // Listeners run without the lock held and read the entry's latest state,
    // so a listener that re-enters the arbiter never observes a stale outcome.
    fn dispatch(&self, pending: Pending) {
        for (id, listener) in pending {
            let Some(current) = self.state(id) else {
                continue;
            };
            listener(&current);
        }
    }
}

fn refresh_locked(state: &mut ArbiterState, path: &str) -> Pending {
    state.winner = None;
    state.stats.record_refresh();

    let mut pending = Vec::with_capacity(state.entries.len());
    for entry in state.entries.iter_mut() {
        let next = if state.winner.is_none() {
            MatchState::from(entry.matcher.exec(path))
        } else {
            MatchState::Unmatched
        };
        if next.is_matched() {
            state.winner = Some(entry.id);
        }
        entry.state = next;
        pending.push((entry.id, Arc::clone(&entry.listener)));
    }

    tracing::debug!(
        path,
        winner = ?state.winner,
        entries = state.entries.len() as u64,
        "arbiter refreshed"
    );
    pending
}

impl fmt::Debug for Arbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Arbiter")
            .field("location", &self.inner.location)
            .field("entries", &state.entries)
            .field("winner", &state.winner)
            .finish()
    }
}
