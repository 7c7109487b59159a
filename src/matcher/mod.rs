mod compiled;
mod params;
mod result;

pub use compiled::{Matcher, RouteMatcher};
pub use params::{MatchParams, ParamEntry, ParamValue};
pub use result::PathMatch;
