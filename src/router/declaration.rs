use serde::{Deserialize, Serialize};

use super::MatchOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// The pattern must consume the whole path.
    #[default]
    Exact,
    /// The pattern consumes a leading portion; nested routes see the rest.
    Prefix,
}

/// Declarative route: what kind of match, against which pattern. A missing
/// path declares a fallback that always matches and consumes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteDecl {
    #[serde(default)]
    pub kind: RouteKind,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub options: MatchOptions,
}

impl RouteDecl {
    pub fn exact<S: Into<String>>(path: S) -> Self {
        Self {
            kind: RouteKind::Exact,
            path: Some(path.into()),
            options: MatchOptions::default(),
        }
    }

    pub fn prefix<S: Into<String>>(path: S) -> Self {
        Self {
            kind: RouteKind::Prefix,
            path: Some(path.into()),
            options: MatchOptions::prefix(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            kind: RouteKind::Prefix,
            path: None,
            options: MatchOptions::prefix(),
        }
    }

    pub fn sensitive(mut self, value: bool) -> Self {
        self.options.sensitive = value;
        self
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.options.strict = value;
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.path.is_none()
    }

    /// Options actually used for matching; the kind decides `end`.
    pub fn effective_options(&self) -> MatchOptions {
        MatchOptions {
            start: true,
            end: self.kind == RouteKind::Exact,
            ..self.options.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_overrides_end_option() {
        let mut decl = RouteDecl::exact("/a");
        decl.options.end = false;
        assert!(decl.effective_options().end);

        let mut decl = RouteDecl::prefix("/a");
        decl.options.end = true;
        assert!(!decl.effective_options().end);
    }

    #[test]
    fn fallback_has_no_path() {
        assert!(RouteDecl::fallback().is_fallback());
        assert!(!RouteDecl::exact("/").is_fallback());
    }
}
