use super::ast::{ParamKey, ParamStyle, PatternAst, PatternNode};
use super::compiled::default_param_pattern;
use super::{CompiledPattern, PatternResult, compile_pattern_ast, parse_pattern};
use crate::router::MatchOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct PatternAnalysis {
    pub pattern: String,
    pub ast: PatternAst,
    pub compiled: CompiledPattern,
    pub tokens: Vec<PatternToken>,
    pub regex: String,
}

/// Flat view of a pattern with defaults resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternToken {
    Literal {
        value: String,
    },
    Parameter {
        key: ParamKey,
        prefix: String,
        suffix: String,
        pattern: String,
        optional: bool,
        repeatable: bool,
        constrained: bool,
    },
    Group {
        value: String,
        optional: bool,
        repeatable: bool,
    },
}

pub fn compile(pattern: &str, options: &MatchOptions) -> PatternResult<CompiledPattern> {
    let ast = parse_pattern(pattern, options)?;
    Ok(compile_pattern_ast(&ast, options))
}

pub fn tokens(pattern: &str, options: &MatchOptions) -> PatternResult<Vec<PatternToken>> {
    let ast = parse_pattern(pattern, options)?;
    Ok(collect_tokens(&ast, options))
}

pub fn to_regex(pattern: &str, options: &MatchOptions) -> PatternResult<String> {
    Ok(compile(pattern, options)?.source)
}

pub fn analyze(pattern: &str, options: &MatchOptions) -> PatternResult<PatternAnalysis> {
    let ast = parse_pattern(pattern, options)?;
    let compiled = compile_pattern_ast(&ast, options);
    let tokens = collect_tokens(&ast, options);
    let regex = compiled.source.clone();

    Ok(PatternAnalysis {
        pattern: pattern.to_string(),
        ast,
        compiled,
        tokens,
        regex,
    })
}

fn collect_tokens(ast: &PatternAst, options: &MatchOptions) -> Vec<PatternToken> {
    let default_pattern = default_param_pattern(&options.delimiter);
    ast.nodes
        .iter()
        .map(|node| match node {
            PatternNode::Literal(value) => PatternToken::Literal {
                value: value.clone(),
            },
            PatternNode::Parameter(param) => PatternToken::Parameter {
                key: param.key.clone(),
                prefix: param.prefix.clone(),
                suffix: param.suffix.clone(),
                pattern: param
                    .constraint
                    .as_ref()
                    .map(|constraint| constraint.raw.clone())
                    .unwrap_or_else(|| default_pattern.clone()),
                optional: param.quantifier.is_optional(),
                repeatable: param.quantifier.is_repeating(),
                constrained: param.style != ParamStyle::Wildcard && param.constraint.is_some(),
            },
            PatternNode::Group(group) => PatternToken::Group {
                value: group.literal.clone(),
                optional: group.quantifier.is_optional(),
                repeatable: group.quantifier.is_repeating(),
            },
        })
        .collect()
}
