use regex::escape;

use super::ast::{
    GroupNode, ParamKey, ParamStyle, ParameterNode, PatternAst, PatternNode, Quantifier,
};
use crate::path::encode_literal;
use crate::router::MatchOptions;

/// Regex source plus the capture layout needed to read parameters back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    pub source: String,
    pub keys: Vec<PatternKey>,
    /// Capture group holding the trailing delimiter that bounds an open-ended
    /// match; it is not part of the matched text.
    pub boundary_group: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternKey {
    pub key: ParamKey,
    pub prefix: String,
    pub suffix: String,
    pub quantifier: Quantifier,
    pub style: ParamStyle,
}

impl PatternKey {
    /// Separator between elements of a repeated capture.
    pub fn repeat_separator(&self) -> String {
        format!("{}{}", self.suffix, self.prefix)
    }
}

#[tracing::instrument(level = "trace", skip(ast, options), fields(nodes = ast.nodes.len() as u64))]
pub fn compile_pattern_ast(ast: &PatternAst, options: &MatchOptions) -> CompiledPattern {
    let delimiter = delimiter_class(&options.delimiter);
    let default_pattern = default_param_pattern(&options.delimiter);

    let mut source = String::new();
    if options.start {
        source.push('^');
    }

    let mut keys = Vec::new();
    for node in &ast.nodes {
        match node {
            PatternNode::Literal(value) => source.push_str(&escape(&encode_literal(value))),
            PatternNode::Group(group) => source.push_str(&group_to_regex(group)),
            PatternNode::Parameter(param) => {
                source.push_str(&parameter_to_regex(param, &default_pattern));
                keys.push(PatternKey {
                    key: param.key.clone(),
                    prefix: param.prefix.clone(),
                    suffix: param.suffix.clone(),
                    quantifier: param.quantifier,
                    style: param.style,
                });
            }
        }
    }

    let mut boundary_group = None;
    if options.end {
        if !options.strict {
            source.push_str(&delimiter);
            source.push('?');
        }
        source.push('$');
    } else {
        if !options.strict {
            source.push_str(&format!("(?:{delimiter}$)?"));
        }
        if !is_end_delimited(ast, options) {
            source.push_str(&format!("({delimiter}|$)"));
            boundary_group = Some(keys.len() + 1);
        }
    }

    CompiledPattern {
        source,
        keys,
        boundary_group,
    }
}

pub fn default_param_pattern(delimiter: &str) -> String {
    format!("[^{}]+?", escape_class_chars(delimiter))
}

fn delimiter_class(delimiter: &str) -> String {
    format!("[{}]", escape_class_chars(delimiter))
}

fn escape_class_chars(chars: &str) -> String {
    chars.chars().map(|ch| escape(ch.encode_utf8(&mut [0; 4]))).collect()
}

fn is_end_delimited(ast: &PatternAst, options: &MatchOptions) -> bool {
    match ast.nodes.last() {
        None => true,
        Some(PatternNode::Literal(value)) => value
            .chars()
            .last()
            .is_some_and(|ch| options.is_delimiter(ch)),
        Some(_) => false,
    }
}

fn parameter_to_regex(param: &ParameterNode, default_pattern: &str) -> String {
    let body = param
        .constraint
        .as_ref()
        .map(|constraint| constraint.raw.as_str())
        .unwrap_or(default_pattern);
    let prefix = escape(&encode_literal(&param.prefix));
    let suffix = escape(&encode_literal(&param.suffix));
    let modifier = param.quantifier.as_modifier();

    if prefix.is_empty() && suffix.is_empty() {
        // Zero repetitions must leave the capture unset, not empty.
        return match param.quantifier {
            Quantifier::ZeroOrMore => format!("((?:{body})+)?"),
            Quantifier::OneOrMore => format!("((?:{body})+)"),
            Quantifier::One | Quantifier::ZeroOrOne => format!("({body}){modifier}"),
        };
    }

    if param.quantifier.is_repeating() {
        let optional = if param.quantifier == Quantifier::ZeroOrMore {
            "?"
        } else {
            ""
        };
        return format!(
            "(?:{prefix}((?:{body})(?:{suffix}{prefix}(?:{body}))*){suffix}){optional}"
        );
    }

    format!("(?:{prefix}({body}){suffix}){modifier}")
}

fn group_to_regex(group: &GroupNode) -> String {
    format!(
        "(?:{}){}",
        escape(&encode_literal(&group.literal)),
        group.quantifier.as_modifier()
    )
}
