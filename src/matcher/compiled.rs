use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use super::{MatchParams, ParamValue, PathMatch};
use crate::path::{PathResult, decode_component, encode_literal};
use crate::pattern::{PatternError, PatternKey, PatternResult, compile_pattern_ast, parse_pattern};
use crate::router::MatchOptions;

const MAX_REGEX_SIZE: usize = 1 << 20;

/// Compiled recognizer for one (pattern, options) pair. Immutable and cheap to
/// share; matching never mutates it.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    options: MatchOptions,
    regex: Regex,
    keys: Arc<[PatternKey]>,
    boundary_group: Option<usize>,
}

impl Matcher {
    #[tracing::instrument(
        level = "trace",
        skip(options),
        fields(end = options.end, sensitive = options.sensitive)
    )]
    pub fn compile(pattern: &str, options: &MatchOptions) -> PatternResult<Self> {
        let ast = parse_pattern(pattern, options)?;
        let compiled = compile_pattern_ast(&ast, options);
        let regex = build_regex(pattern, &compiled.source, options.sensitive)?;

        Ok(Self {
            pattern: pattern.to_string(),
            options: options.clone(),
            regex,
            keys: compiled.keys.into(),
            boundary_group: compiled.boundary_group,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn keys(&self) -> &[PatternKey] {
        &self.keys
    }

    pub fn regex_source(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, subject: &str) -> bool {
        self.exec(subject).is_some()
    }

    /// Runs the matcher. Any parameter that fails to decode turns the whole
    /// attempt into a non-match.
    #[tracing::instrument(level = "trace", skip(self), fields(pattern = %self.pattern))]
    pub fn exec(&self, subject: &str) -> Option<PathMatch> {
        let captures = self.regex.captures(subject)?;
        let whole = captures.get(0)?;
        let end = self
            .boundary_group
            .and_then(|group| captures.get(group))
            .map_or(whole.end(), |boundary| boundary.start());

        let mut params = MatchParams::with_capacity(self.keys.len());
        for (idx, key) in self.keys.iter().enumerate() {
            let value = match captures.get(idx + 1) {
                Some(capture) => match decode_capture(key, capture.as_str()) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        tracing::trace!(key = %key.key, error = %err, "parameter failed to decode");
                        return None;
                    }
                },
                None => None,
            };
            params.insert(key.key.clone(), value);
        }

        let matched_text = subject.get(whole.start()..end)?.to_string();
        Some(PathMatch::new(matched_text, whole.start(), params))
    }
}

fn build_regex(pattern: &str, source: &str, sensitive: bool) -> PatternResult<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(!sensitive)
        .size_limit(MAX_REGEX_SIZE)
        .build()
        .map_err(|err| PatternError::RegexCompile {
            pattern: pattern.to_string(),
            error: err.to_string(),
        })
}

fn decode_capture(key: &PatternKey, raw: &str) -> PathResult<ParamValue> {
    if !key.quantifier.is_repeating() {
        return decode_component(raw).map(ParamValue::Single);
    }

    let separator = encode_literal(&key.repeat_separator());
    let values = if separator.is_empty() {
        vec![decode_component(raw)?]
    } else {
        raw.split(separator.as_str())
            .map(decode_component)
            .collect::<PathResult<Vec<_>>>()?
    };
    Ok(ParamValue::Multiple(values))
}

/// What an arbitrated route recognizes: a compiled pattern, or everything.
#[derive(Debug, Clone)]
pub enum RouteMatcher {
    Pattern(Arc<Matcher>),
    /// Matches any URL without consuming path.
    Fallback,
}

impl RouteMatcher {
    pub fn exec(&self, subject: &str) -> Option<PathMatch> {
        match self {
            Self::Pattern(matcher) => matcher.exec(subject),
            Self::Fallback => Some(PathMatch::pass_through()),
        }
    }

    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::Pattern(matcher) => Some(matcher.pattern()),
            Self::Fallback => None,
        }
    }
}

impl From<Matcher> for RouteMatcher {
    fn from(matcher: Matcher) -> Self {
        Self::Pattern(Arc::new(matcher))
    }
}

impl From<Arc<Matcher>> for RouteMatcher {
    fn from(matcher: Arc<Matcher>) -> Self {
        Self::Pattern(matcher)
    }
}
