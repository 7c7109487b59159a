use std::sync::Arc;
use url::Url;

use super::{MatchOptions, RouteDecl, RouteHandle, RouterOptions, RouterResult};
use crate::arbiter::{Arbiter, MatchState};
use crate::builder::BuildParams;
use crate::cache::CompileCache;
use crate::location::LocationSource;
use crate::matcher::{PathMatch, RouteMatcher};

/// Routing view of one location. Routers over the same location share its
/// arbiter; nested routers share the compile cache of their parent but
/// arbitrate under their own location.
#[derive(Debug, Clone)]
pub struct Router {
    location: Arc<dyn LocationSource>,
    arbiter: Arbiter,
    cache: Arc<CompileCache>,
    options: RouterOptions,
}

impl Router {
    pub fn new(
        location: Arc<dyn LocationSource>,
        options: Option<RouterOptions>,
    ) -> RouterResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;
        let cache = Arc::new(CompileCache::new(options.cache_capacity));
        Ok(Self::with_cache(location, cache, options))
    }

    fn with_cache(
        location: Arc<dyn LocationSource>,
        cache: Arc<CompileCache>,
        options: RouterOptions,
    ) -> Self {
        Self {
            arbiter: Arbiter::for_location(Arc::clone(&location)),
            location,
            cache,
            options,
        }
    }

    pub fn location(&self) -> &Arc<dyn LocationSource> {
        &self.location
    }

    pub fn url(&self) -> Url {
        self.location.url()
    }

    pub fn arbiter(&self) -> &Arbiter {
        &self.arbiter
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Compile-cache hits and misses.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    pub fn push(&self, to: &str) -> RouterResult<()> {
        self.location.push(to)?;
        Ok(())
    }

    /// Registers a route with this router's arbiter. `on_change` runs on every
    /// later re-arbitration with the route's new state.
    #[tracing::instrument(
        level = "trace",
        skip(self, decl, on_change),
        fields(path = ?decl.path, kind = ?decl.kind)
    )]
    pub fn register<F>(&self, decl: &RouteDecl, on_change: F) -> RouterResult<RouteHandle>
    where
        F: Fn(&MatchState) + Send + Sync + 'static,
    {
        let matcher = self.route_matcher(decl)?;
        let (id, _) = self.arbiter.register(matcher.clone(), Arc::new(on_change));
        Ok(RouteHandle::new(self.arbiter.clone(), id, matcher))
    }

    /// One-shot match of `decl` against the current URL, outside arbitration.
    pub fn match_route(&self, decl: &RouteDecl) -> RouterResult<Option<PathMatch>> {
        let matcher = self.route_matcher(decl)?;
        Ok(matcher.exec(self.location.url().path()))
    }

    pub fn build_path(&self, pattern: &str, params: &BuildParams) -> RouterResult<String> {
        let builder = self.cache.builder(pattern, &MatchOptions::default())?;
        Ok(builder.build(params)?)
    }

    /// Child router whose location is the residual of `handle`'s match.
    pub fn nest(&self, handle: &RouteHandle) -> Router {
        let location = handle.nested_location();
        tracing::debug!(pattern = ?handle.matcher().pattern(), "nested router created");
        Self::with_cache(location, Arc::clone(&self.cache), self.options.clone())
    }

    fn route_matcher(&self, decl: &RouteDecl) -> RouterResult<RouteMatcher> {
        let Some(path) = decl.path.as_deref() else {
            return Ok(RouteMatcher::Fallback);
        };
        let options = decl.effective_options();
        options.validate()?;
        Ok(RouteMatcher::Pattern(self.cache.matcher(path, &options)?))
    }
}
