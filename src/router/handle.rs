use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::arbiter::{Arbiter, EntryId, MatchState};
use crate::location::{LocationSource, NestedLocation};
use crate::matcher::{PathMatch, RouteMatcher};

/// Registration of one route with an arbiter. Dropping the handle
/// deregisters the route.
#[must_use = "dropping a RouteHandle deregisters the route"]
pub struct RouteHandle {
    arbiter: Arbiter,
    id: EntryId,
    matcher: RouteMatcher,
    nested: OnceLock<Arc<dyn LocationSource>>,
}

impl RouteHandle {
    pub(crate) fn new(arbiter: Arbiter, id: EntryId, matcher: RouteMatcher) -> Self {
        Self {
            arbiter,
            id,
            matcher,
            nested: OnceLock::new(),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn state(&self) -> MatchState {
        self.arbiter.state(self.id).unwrap_or_default()
    }

    pub fn is_matched(&self) -> bool {
        self.state().is_matched()
    }

    pub fn matched(&self) -> Option<PathMatch> {
        match self.state() {
            MatchState::Matched(found) => Some(found),
            MatchState::Unmatched => None,
        }
    }

    pub fn matcher(&self) -> &RouteMatcher {
        &self.matcher
    }

    /// Location beneath this route. Created once, so every router nested
    /// under this handle shares one arbiter.
    pub fn nested_location(&self) -> Arc<dyn LocationSource> {
        let location = self.nested.get_or_init(|| {
            Arc::new(NestedLocation::new(
                Arc::clone(self.arbiter.location()),
                self.matcher.clone(),
            ))
        });
        Arc::clone(location)
    }

    pub fn deregister(self) {}
}

impl Drop for RouteHandle {
    fn drop(&mut self) {
        self.arbiter.deregister(self.id);
    }
}

impl fmt::Debug for RouteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandle")
            .field("id", &self.id)
            .field("pattern", &self.matcher.pattern())
            .finish()
    }
}
