use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DELIMITER: &str = "/#?";
pub const DEFAULT_PREFIXES: &str = "./";
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Options shared by the matcher and the builder compiled from one pattern.
///
/// `start`/`end` only affect matching; `validate` only affects building.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    pub sensitive: bool,
    pub strict: bool,
    pub start: bool,
    pub end: bool,
    pub delimiter: String,
    pub prefixes: String,
    pub validate: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            sensitive: false,
            strict: false,
            start: true,
            end: true,
            delimiter: DEFAULT_DELIMITER.to_string(),
            prefixes: DEFAULT_PREFIXES.to_string(),
            validate: true,
        }
    }
}

impl MatchOptions {
    pub fn builder() -> MatchOptionsBuilder {
        MatchOptionsBuilder::default()
    }

    /// Prefix matching: anchored at the start, open at the end.
    pub fn prefix() -> Self {
        Self {
            end: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.delimiter.is_empty() {
            return Err(RouterOptionsError::EmptyDelimiter);
        }
        Ok(())
    }

    pub(crate) fn is_delimiter(&self, ch: char) -> bool {
        self.delimiter.contains(ch)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MatchOptionsBuilder {
    options: MatchOptions,
}

impl MatchOptionsBuilder {
    pub fn sensitive(mut self, value: bool) -> Self {
        self.options.sensitive = value;
        self
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.options.strict = value;
        self
    }

    pub fn start(mut self, value: bool) -> Self {
        self.options.start = value;
        self
    }

    pub fn end(mut self, value: bool) -> Self {
        self.options.end = value;
        self
    }

    pub fn delimiter<S: Into<String>>(mut self, value: S) -> Self {
        self.options.delimiter = value.into();
        self
    }

    pub fn prefixes<S: Into<String>>(mut self, value: S) -> Self {
        self.options.prefixes = value.into();
        self
    }

    pub fn validate(mut self, value: bool) -> Self {
        self.options.validate = value;
        self
    }

    pub fn build(self) -> Result<MatchOptions, RouterOptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    pub cache_capacity: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.cache_capacity == 0 {
            return Err(RouterOptionsError::CacheCapacityInvalid { provided: 0 });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn cache_capacity(mut self, value: usize) -> Self {
        self.options.cache_capacity = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("cache_capacity must be at least 1 (got {provided})")]
    CacheCapacityInvalid { provided: usize },
    #[error("delimiter set must not be empty")]
    EmptyDelimiter,
}
