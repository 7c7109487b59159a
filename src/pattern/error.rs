use thiserror::Error;

/// Syntax errors raised while compiling a pattern. Always raised before any
/// matcher or builder exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("parameter in pattern '{pattern}' at byte {index} is missing a name")]
    ParameterMissingName { pattern: String, index: usize },
    #[error(
        "parameter name '{name}' in pattern '{pattern}' must start with an alphabetic character or underscore (found '{found}')"
    )]
    ParameterInvalidStart {
        pattern: String,
        name: String,
        found: char,
    },
    #[error("parameter name '{name}' appears more than once in pattern '{pattern}'")]
    DuplicateParameterName { pattern: String, name: String },
    #[error("modifier '{modifier}' at byte {index} in pattern '{pattern}' does not follow a parameter or group")]
    DanglingQuantifier {
        pattern: String,
        index: usize,
        modifier: char,
    },
    #[error("wildcard at byte {index} in pattern '{pattern}' does not accept modifier '{modifier}'")]
    WildcardQuantifierUnsupported {
        pattern: String,
        index: usize,
        modifier: char,
    },
    #[error("group starting at byte {start} in pattern '{pattern}' is not terminated")]
    UnterminatedGroup { pattern: String, start: usize },
    #[error("group starting at byte {start} in pattern '{pattern}' is empty")]
    EmptyGroup { pattern: String, start: usize },
    #[error("group at byte {index} in pattern '{pattern}' is nested inside another group")]
    NestedGroupNotAllowed { pattern: String, index: usize },
    #[error("group starting at byte {start} in pattern '{pattern}' binds more than one parameter")]
    GroupParameterLimit { pattern: String, start: usize },
    #[error("unexpected ')' at byte {index} in pattern '{pattern}'")]
    UnexpectedClosingParenthesis { pattern: String, index: usize },
    #[error("unexpected '}}' at byte {index} in pattern '{pattern}'")]
    UnexpectedClosingBrace { pattern: String, index: usize },
    #[error("constraint for parameter '{name}' starting at byte {start} in pattern '{pattern}' is not terminated")]
    UnterminatedParameterConstraint {
        pattern: String,
        name: String,
        start: usize,
    },
    #[error("constraint for parameter '{name}' in pattern '{pattern}' is empty")]
    EmptyConstraint { pattern: String, name: String },
    #[error("constraint for parameter '{name}' in pattern '{pattern}' must not start with '?'")]
    ConstraintStartsWithModifier { pattern: String, name: String },
    #[error("constraint for parameter '{name}' in pattern '{pattern}' contains a capturing group")]
    CapturingGroupInConstraint { pattern: String, name: String },
    #[error("constraint for parameter '{name}' in pattern '{pattern}' is not a valid regex: {error}")]
    RegexConstraintInvalid {
        pattern: String,
        name: String,
        error: String,
    },
    #[error("pattern '{pattern}' ends with a lone escape character at byte {index}")]
    LoneEscapeCharacter { pattern: String, index: usize },
    #[error("pattern '{pattern}' could not be compiled into a regex: {error}")]
    RegexCompile { pattern: String, error: String },
}

pub type PatternResult<T> = Result<T, PatternError>;
