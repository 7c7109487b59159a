mod lru;
mod store;

pub use lru::{CacheStats, LruCache};
pub use store::{CompileCache, CompileKey};
