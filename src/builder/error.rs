use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing value for required parameter '{name}'")]
    MissingParameter { name: String },
    #[error("value '{value}' for parameter '{name}' does not match constraint '{constraint}'")]
    ConstraintViolation {
        name: String,
        constraint: String,
        value: String,
    },
    #[error("parameter '{name}' does not repeat but received {count} values")]
    UnexpectedRepeat { name: String, count: usize },
    #[error("repeatable parameter '{name}' requires at least one value")]
    EmptyRepeat { name: String },
}

pub type BuildResult<T> = Result<T, BuildError>;
