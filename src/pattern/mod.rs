mod analysis;
mod ast;
mod compiled;
mod error;
mod parser;

pub use analysis::{PatternAnalysis, PatternToken, analyze, compile, to_regex, tokens};
pub use ast::{
    GroupNode, ParamKey, ParamStyle, ParameterConstraint, ParameterNode, PatternAst, PatternNode,
    Quantifier,
};
pub use compiled::{CompiledPattern, PatternKey, compile_pattern_ast, default_param_pattern};
pub use error::{PatternError, PatternResult};
pub use parser::{WILDCARD_PATTERN, parse_pattern};
