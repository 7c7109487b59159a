use url::Url;

use super::MatchParams;
use crate::path::{residual, residual_path};

/// Successful match: the consumed text, where it starts in the subject, and the
/// decoded parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMatch {
    pub matched_text: String,
    pub offset: usize,
    pub params: MatchParams,
}

impl PathMatch {
    pub fn new(matched_text: String, offset: usize, params: MatchParams) -> Self {
        Self {
            matched_text,
            offset,
            params,
        }
    }

    /// Match that consumes nothing; nested routes see the URL unchanged.
    pub fn pass_through() -> Self {
        Self::default()
    }

    pub fn is_pass_through(&self) -> bool {
        self.matched_text.is_empty()
    }

    pub fn residual(&self, url: &Url) -> Url {
        residual(url, &self.matched_text, self.offset)
    }

    pub fn residual_path(&self, path: &str) -> String {
        residual_path(path, &self.matched_text, self.offset)
    }
}
