mod declaration;
mod errors;
mod handle;
mod options;
mod service;

pub use declaration::{RouteDecl, RouteKind};
pub use errors::{RouterError, RouterResult};
pub use handle::RouteHandle;
pub use options::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_DELIMITER, DEFAULT_PREFIXES, MatchOptions,
    MatchOptionsBuilder, RouterOptions, RouterOptionsBuilder, RouterOptionsError,
};
pub use service::Router;
