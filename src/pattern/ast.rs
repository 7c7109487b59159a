use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct PatternAst {
    pub nodes: Vec<PatternNode>,
}

impl PatternAst {
    pub fn new(nodes: Vec<PatternNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parameters(&self) -> impl Iterator<Item = &ParameterNode> {
        self.nodes.iter().filter_map(|node| match node {
            PatternNode::Parameter(param) => Some(param),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PatternNode {
    Literal(String),
    Parameter(ParameterNode),
    /// `{...}` group without a parameter: an optional or repeated literal.
    Group(GroupNode),
}

/// Name of a parameter, or its position among unnamed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamKey {
    Named(String),
    Index(usize),
}

impl ParamKey {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Named(_) => None,
            Self::Index(idx) => Some(*idx),
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for ParamKey {
    fn from(value: &str) -> Self {
        Self::Named(value.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(value: String) -> Self {
        Self::Named(value)
    }
}

impl From<usize> for ParamKey {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamStyle {
    /// `:name`
    Colon,
    /// `(regex)`
    Regex,
    /// `*`
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterNode {
    pub key: ParamKey,
    pub prefix: String,
    pub suffix: String,
    pub constraint: Option<ParameterConstraint>,
    pub quantifier: Quantifier,
    pub style: ParamStyle,
}

impl ParameterNode {
    pub fn new(
        key: ParamKey,
        constraint: Option<ParameterConstraint>,
        quantifier: Quantifier,
        style: ParamStyle,
    ) -> Self {
        Self {
            key,
            prefix: String::new(),
            suffix: String::new(),
            constraint,
            quantifier,
            style,
        }
    }

    pub fn with_affixes(mut self, prefix: String, suffix: String) -> Self {
        self.prefix = prefix;
        self.suffix = suffix;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.key.as_name()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterConstraint {
    pub raw: String,
}

impl ParameterConstraint {
    pub fn new(raw: String) -> Self {
        Self { raw }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub literal: String,
    pub quantifier: Quantifier,
}

impl GroupNode {
    pub fn new(literal: String, quantifier: Quantifier) -> Self {
        Self {
            literal,
            quantifier,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.literal.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    One,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

impl Quantifier {
    pub fn from_modifier(ch: Option<char>) -> Option<Self> {
        match ch {
            Some('?') => Some(Self::ZeroOrOne),
            Some('*') => Some(Self::ZeroOrMore),
            Some('+') => Some(Self::OneOrMore),
            _ => None,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::ZeroOrOne | Self::ZeroOrMore)
    }

    pub fn is_repeating(&self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::OneOrMore)
    }

    pub fn as_modifier(&self) -> &'static str {
        match self {
            Self::One => "",
            Self::ZeroOrOne => "?",
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
        }
    }
}
