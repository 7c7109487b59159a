use std::fmt;
use std::sync::Arc;

use crate::matcher::{PathMatch, RouteMatcher};

pub type MatchListener = Arc<dyn Fn(&MatchState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arbitrated outcome for one entry. `Matched` is held by at most one entry of
/// an arbiter at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MatchState {
    #[default]
    Unmatched,
    Matched(PathMatch),
}

impl MatchState {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn as_match(&self) -> Option<&PathMatch> {
        match self {
            Self::Matched(found) => Some(found),
            Self::Unmatched => None,
        }
    }
}

impl From<Option<PathMatch>> for MatchState {
    fn from(found: Option<PathMatch>) -> Self {
        found.map_or(Self::Unmatched, Self::Matched)
    }
}

pub(crate) struct Entry {
    pub(crate) id: EntryId,
    pub(crate) matcher: RouteMatcher,
    pub(crate) listener: MatchListener,
    pub(crate) state: MatchState,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("pattern", &self.matcher.pattern())
            .field("state", &self.state)
            .finish()
    }
}
