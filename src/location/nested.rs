use std::sync::Arc;
use url::Url;

use super::{Listener, LocationResult, LocationSource, Subscription};
use crate::arbiter::ArbiterSlot;
use crate::matcher::RouteMatcher;

/// Location seen beneath a route: the parent URL minus what the route's matcher
/// consumes. Recomputed from the parent on every read.
#[derive(Debug)]
pub struct NestedLocation {
    parent: Arc<dyn LocationSource>,
    matcher: RouteMatcher,
    arbiter: ArbiterSlot,
}

impl NestedLocation {
    pub fn new(parent: Arc<dyn LocationSource>, matcher: RouteMatcher) -> Self {
        Self {
            parent,
            matcher,
            arbiter: ArbiterSlot::new(),
        }
    }
}

impl LocationSource for NestedLocation {
    fn url(&self) -> Url {
        let parent_url = self.parent.url();
        match self.matcher.exec(parent_url.path()) {
            Some(found) => found.residual(&parent_url),
            None => parent_url,
        }
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.parent.subscribe(listener)
    }

    /// Only the outermost location owns navigation.
    fn push(&self, to: &str) -> LocationResult<()> {
        self.parent.push(to)
    }

    fn arbiter_slot(&self) -> &ArbiterSlot {
        &self.arbiter
    }
}
