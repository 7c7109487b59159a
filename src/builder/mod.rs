mod compiled;
mod error;
mod params;

pub use compiled::PathBuilder;
pub use error::{BuildError, BuildResult};
pub use params::BuildParams;
