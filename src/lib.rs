pub mod arbiter;
pub mod builder;
pub mod cache;
pub mod location;
pub mod matcher;
pub mod path;
pub mod pattern;
pub mod router;

pub use arbiter::{Arbiter, ArbiterStats, EntryId, MatchListener, MatchState};
pub use builder::{BuildError, BuildParams, PathBuilder};
pub use location::{LocationError, LocationSource, MemoryLocation, NestedLocation, Subscription};
pub use matcher::{MatchParams, Matcher, ParamValue, PathMatch, RouteMatcher};
pub use path::{PathError, residual, residual_path};
pub use pattern::{ParamKey, PatternError, PatternResult};
pub use router::{
    MatchOptions, RouteDecl, RouteHandle, RouteKind, Router, RouterError, RouterOptions,
    RouterOptionsError, RouterResult,
};

/// Compiles `pattern` into a reusable matcher.
pub fn compile_matcher(pattern: &str, options: &MatchOptions) -> PatternResult<Matcher> {
    Matcher::compile(pattern, options)
}

/// Compiles `pattern` into a reusable path builder.
pub fn compile_builder(pattern: &str, options: &MatchOptions) -> PatternResult<PathBuilder> {
    PathBuilder::compile(pattern, options)
}

/// One-shot match. Compile errors surface; a non-matching subject is `Ok(None)`.
pub fn match_path(
    pattern: &str,
    options: &MatchOptions,
    subject: &str,
) -> PatternResult<Option<PathMatch>> {
    Ok(Matcher::compile(pattern, options)?.exec(subject))
}

/// One-shot build with default options.
pub fn build_path(pattern: &str, params: &BuildParams) -> RouterResult<String> {
    let builder = PathBuilder::compile(pattern, &MatchOptions::default())?;
    Ok(builder.build(params)?)
}
