use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("'{input}' is not a valid location: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

pub type LocationResult<T> = Result<T, LocationError>;
