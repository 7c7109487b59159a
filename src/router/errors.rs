use crate::builder::BuildError;
use crate::location::LocationError;
use crate::pattern::PatternError;
use thiserror::Error;

use super::RouterOptionsError;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error(transparent)]
    Options(#[from] RouterOptionsError),
}

pub type RouterResult<T> = Result<T, RouterError>;
