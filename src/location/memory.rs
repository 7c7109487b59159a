use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use url::Url;

use super::{Listener, LocationError, LocationResult, LocationSource, Subscription};
use crate::arbiter::ArbiterSlot;

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("next_id", &self.next_id)
            .field("listeners", &self.entries.len())
            .finish()
    }
}

/// In-memory location that owns its URL and navigation.
#[derive(Debug)]
pub struct MemoryLocation {
    current: RwLock<Url>,
    listeners: Arc<Mutex<ListenerSet>>,
    arbiter: ArbiterSlot,
}

impl MemoryLocation {
    pub fn new(url: &str) -> LocationResult<Self> {
        let parsed = Url::parse(url).map_err(|source| LocationError::InvalidUrl {
            input: url.to_string(),
            source,
        })?;
        Ok(Self::from_url(parsed))
    }

    pub fn from_url(url: Url) -> Self {
        Self {
            current: RwLock::new(url),
            listeners: Arc::new(Mutex::new(ListenerSet::default())),
            arbiter: ArbiterSlot::new(),
        }
    }

    /// Replaces the URL and notifies every listener once.
    pub fn set_url(&self, url: Url) {
        {
            let mut current = self.current.write();
            *current = url;
        }
        self.notify();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().entries.len()
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        tracing::trace!(listeners = listeners.len() as u64, "location changed");
        for listener in listeners {
            listener();
        }
    }
}

impl LocationSource for MemoryLocation {
    fn url(&self) -> Url {
        self.current.read().clone()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut set = self.listeners.lock();
            let id = set.next_id;
            set.next_id += 1;
            set.entries.push((id, listener));
            id
        };

        let weak = Arc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(set) = weak.upgrade() {
                set.lock().entries.retain(|(candidate, _)| *candidate != id);
            }
        })
    }

    fn push(&self, to: &str) -> LocationResult<()> {
        let next = self
            .current
            .read()
            .join(to)
            .map_err(|source| LocationError::InvalidUrl {
                input: to.to_string(),
                source,
            })?;
        tracing::debug!(to, url = %next, "location push");
        self.set_url(next);
        Ok(())
    }

    fn arbiter_slot(&self) -> &ArbiterSlot {
        &self.arbiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn push_resolves_relative_to_current_url() {
        let location = MemoryLocation::new("http://localhost/app/users?x=1").unwrap();
        location.push("/about#team").unwrap();
        assert_eq!(location.url().as_str(), "http://localhost/about#team");
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let location = MemoryLocation::new("http://localhost/").unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = location.subscribe(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        location.push("/a").unwrap();
        drop(subscription);
        location.push("/b").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(location.listener_count(), 0);
    }
}
