mod error;
mod memory;
mod nested;
mod subscription;

pub use error::{LocationError, LocationResult};
pub use memory::MemoryLocation;
pub use nested::NestedLocation;
pub use subscription::{Listener, Subscription};

use std::fmt;
use url::Url;

use crate::arbiter::ArbiterSlot;

/// Source of the current URL and of change notifications.
pub trait LocationSource: fmt::Debug + Send + Sync {
    /// Snapshot of the current URL.
    fn url(&self) -> Url;

    /// Registers `listener` to run after every URL change until the returned
    /// guard is dropped.
    fn subscribe(&self, listener: Listener) -> Subscription;

    /// Navigates to `to`, resolved against the current URL.
    fn push(&self, to: &str) -> LocationResult<()>;

    /// Slot holding the one arbiter of this location.
    fn arbiter_slot(&self) -> &ArbiterSlot;
}
