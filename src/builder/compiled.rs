use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use super::{BuildError, BuildParams, BuildResult};
use crate::matcher::ParamValue;
use crate::path::{encode_component, encode_literal, encode_segments};
use crate::pattern::{
    ParamKey, ParamStyle, PatternError, PatternNode, PatternResult, Quantifier,
    default_param_pattern, parse_pattern,
};
use crate::router::MatchOptions;

#[derive(Debug, Clone)]
enum BuildToken {
    Literal(String),
    Group {
        literal: String,
        quantifier: Quantifier,
    },
    Param(ParamToken),
}

#[derive(Debug, Clone)]
struct ParamToken {
    key: ParamKey,
    prefix: String,
    suffix: String,
    quantifier: Quantifier,
    style: ParamStyle,
    constraint: Regex,
    constraint_source: String,
}

/// Compiled path generator: substitutes percent-encoded parameter values into a
/// pattern. Pure; independent of any location.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    pattern: String,
    tokens: Arc<[BuildToken]>,
    validate: bool,
}

impl PathBuilder {
    #[tracing::instrument(level = "trace", skip(options))]
    pub fn compile(pattern: &str, options: &MatchOptions) -> PatternResult<Self> {
        let ast = parse_pattern(pattern, options)?;
        let default_pattern = default_param_pattern(&options.delimiter);

        let mut tokens = Vec::with_capacity(ast.nodes.len());
        for node in ast.nodes {
            let token = match node {
                PatternNode::Literal(value) => BuildToken::Literal(encode_literal(&value)),
                PatternNode::Group(group) => BuildToken::Group {
                    literal: encode_literal(&group.literal),
                    quantifier: group.quantifier,
                },
                PatternNode::Parameter(param) => {
                    let constraint_source = param
                        .constraint
                        .map(|constraint| constraint.raw)
                        .unwrap_or_else(|| default_pattern.clone());
                    let constraint = RegexBuilder::new(&format!("^(?:{constraint_source})$"))
                        .case_insensitive(!options.sensitive)
                        .build()
                        .map_err(|err| PatternError::RegexCompile {
                            pattern: pattern.to_string(),
                            error: err.to_string(),
                        })?;
                    BuildToken::Param(ParamToken {
                        key: param.key,
                        prefix: encode_literal(&param.prefix),
                        suffix: encode_literal(&param.suffix),
                        quantifier: param.quantifier,
                        style: param.style,
                        constraint,
                        constraint_source,
                    })
                }
            };
            tokens.push(token);
        }

        Ok(Self {
            pattern: pattern.to_string(),
            tokens: tokens.into(),
            validate: options.validate,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[tracing::instrument(
        level = "trace",
        skip(self, params),
        fields(pattern = %self.pattern, supplied = params.len() as u64)
    )]
    pub fn build(&self, params: &BuildParams) -> BuildResult<String> {
        let mut path = String::new();
        for token in self.tokens.iter() {
            match token {
                BuildToken::Literal(value) => path.push_str(value),
                BuildToken::Group {
                    literal,
                    quantifier,
                } => {
                    if !quantifier.is_optional() {
                        path.push_str(literal);
                    }
                }
                BuildToken::Param(param) => self.push_param(&mut path, param, params)?,
            }
        }
        Ok(path)
    }

    fn push_param(
        &self,
        path: &mut String,
        param: &ParamToken,
        params: &BuildParams,
    ) -> BuildResult<()> {
        let values = match params.get(&param.key) {
            Some(ParamValue::Multiple(values)) => {
                if !param.quantifier.is_repeating() {
                    return Err(BuildError::UnexpectedRepeat {
                        name: param.key.to_string(),
                        count: values.len(),
                    });
                }
                if values.is_empty() {
                    if param.quantifier.is_optional() {
                        return Ok(());
                    }
                    return Err(BuildError::EmptyRepeat {
                        name: param.key.to_string(),
                    });
                }
                values.as_slice()
            }
            Some(ParamValue::Single(value)) => std::slice::from_ref(value),
            None => {
                if param.quantifier.is_optional() {
                    return Ok(());
                }
                return Err(BuildError::MissingParameter {
                    name: param.key.to_string(),
                });
            }
        };

        for value in values {
            let segment = match param.style {
                ParamStyle::Wildcard => encode_segments(value),
                ParamStyle::Colon | ParamStyle::Regex => encode_component(value),
            };
            if self.validate && !param.constraint.is_match(&segment) {
                return Err(BuildError::ConstraintViolation {
                    name: param.key.to_string(),
                    constraint: param.constraint_source.clone(),
                    value: segment,
                });
            }
            path.push_str(&param.prefix);
            path.push_str(&segment);
            path.push_str(&param.suffix);
        }
        Ok(())
    }
}
