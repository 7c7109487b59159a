mod encoding;
mod error;
mod residual;

pub use encoding::{decode_component, encode_component, encode_literal, encode_segments};
pub use error::{PathError, PathResult};
pub use residual::{residual, residual_path};
