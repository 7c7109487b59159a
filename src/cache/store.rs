use parking_lot::Mutex;
use std::sync::Arc;

use super::{CacheStats, LruCache};
use crate::builder::PathBuilder;
use crate::matcher::Matcher;
use crate::pattern::PatternResult;
use crate::router::MatchOptions;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompileKey {
    pattern: String,
    options: MatchOptions,
}

impl CompileKey {
    pub fn new(pattern: &str, options: &MatchOptions) -> Self {
        Self {
            pattern: pattern.to_string(),
            options: options.clone(),
        }
    }
}

/// Memoizes compiled matchers and builders per (pattern, options). Compile
/// errors are not cached.
#[derive(Debug)]
pub struct CompileCache {
    matchers: Mutex<LruCache<CompileKey, Arc<Matcher>>>,
    builders: Mutex<LruCache<CompileKey, Arc<PathBuilder>>>,
    stats: CacheStats,
}

impl CompileCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            matchers: Mutex::new(LruCache::new(capacity)),
            builders: Mutex::new(LruCache::new(capacity)),
            stats: CacheStats::default(),
        }
    }

    pub fn matcher(&self, pattern: &str, options: &MatchOptions) -> PatternResult<Arc<Matcher>> {
        let key = CompileKey::new(pattern, options);
        if let Some(found) = self.matchers.lock().get(&key) {
            self.stats.record_hit();
            return Ok(found);
        }
        self.stats.record_miss();
        let compiled = Arc::new(Matcher::compile(pattern, options)?);
        self.matchers.lock().insert(key, Arc::clone(&compiled));
        Ok(compiled)
    }

    pub fn builder(
        &self,
        pattern: &str,
        options: &MatchOptions,
    ) -> PatternResult<Arc<PathBuilder>> {
        let key = CompileKey::new(pattern, options);
        if let Some(found) = self.builders.lock().get(&key) {
            self.stats.record_hit();
            return Ok(found);
        }
        self.stats.record_miss();
        let compiled = Arc::new(PathBuilder::compile(pattern, options)?);
        self.builders.lock().insert(key, Arc::clone(&compiled));
        Ok(compiled)
    }

    pub fn stats(&self) -> (u64, u64) {
        self.stats.snapshot()
    }

    pub fn len(&self) -> usize {
        self.matchers.lock().len() + self.builders.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
