mod entry;
mod service;
mod stats;

pub use entry::{EntryId, MatchListener, MatchState};
pub use service::{Arbiter, ArbiterSlot};
pub use stats::ArbiterStats;
