use hashbrown::HashSet;
use regex::Regex;

use crate::pattern::ast::{
    GroupNode, ParamKey, ParamStyle, ParameterConstraint, ParameterNode, PatternAst, PatternNode,
    Quantifier,
};
use crate::pattern::{PatternError, PatternResult};
use crate::router::MatchOptions;

pub const WILDCARD_PATTERN: &str = ".*";

#[tracing::instrument(level = "trace", skip(options), fields(pattern_len = pattern.len() as u64))]
pub fn parse_pattern(pattern: &str, options: &MatchOptions) -> PatternResult<PatternAst> {
    let mut parser = PatternParser::new(pattern, options);
    let nodes = parser.parse_sequence()?;
    let ast = PatternAst::new(nodes);
    validate_ast(&ast, pattern)?;
    Ok(ast)
}

struct PatternParser<'a> {
    pattern: &'a str,
    prefixes: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
    next_positional: usize,
}

impl<'a> PatternParser<'a> {
    fn new(pattern: &'a str, options: &'a MatchOptions) -> Self {
        let chars: Vec<(usize, char)> = pattern.char_indices().collect();
        Self {
            pattern,
            prefixes: &options.prefixes,
            chars,
            index: 0,
            next_positional: 0,
        }
    }

    fn parse_sequence(&mut self) -> PatternResult<Vec<PatternNode>> {
        let mut nodes = Vec::new();
        let mut literal = String::new();
        // An escaped trailing char is never taken as a parameter prefix.
        let mut literal_tail_escaped = false;

        while let Some(ch) = self.peek() {
            match ch {
                ')' => {
                    return Err(PatternError::UnexpectedClosingParenthesis {
                        pattern: self.pattern.to_string(),
                        index: self.current_byte_index(),
                    });
                }
                '}' => {
                    return Err(PatternError::UnexpectedClosingBrace {
                        pattern: self.pattern.to_string(),
                        index: self.current_byte_index(),
                    });
                }
                '?' | '+' => {
                    return Err(PatternError::DanglingQuantifier {
                        pattern: self.pattern.to_string(),
                        index: self.current_byte_index(),
                        modifier: ch,
                    });
                }
                ':' | '(' | '*' => {
                    let param = self.parse_parameter(true)?;
                    let prefix = if literal_tail_escaped {
                        String::new()
                    } else {
                        self.take_prefix(&mut literal)
                    };
                    flush_literal(&mut literal, &mut nodes);
                    literal_tail_escaped = false;
                    nodes.push(PatternNode::Parameter(
                        param.with_affixes(prefix, String::new()),
                    ));
                }
                '{' => {
                    flush_literal(&mut literal, &mut nodes);
                    literal_tail_escaped = false;
                    nodes.push(self.parse_group()?);
                }
                '\\' => {
                    literal.push(self.consume_escape_char()?);
                    literal_tail_escaped = true;
                }
                _ => {
                    literal.push(ch);
                    literal_tail_escaped = false;
                    self.next();
                }
            }
        }

        flush_literal(&mut literal, &mut nodes);
        Ok(nodes)
    }

    fn take_prefix(&self, literal: &mut String) -> String {
        match literal.chars().last() {
            Some(last) if self.prefixes.contains(last) => {
                literal.pop();
                last.to_string()
            }
            _ => String::new(),
        }
    }

    fn parse_parameter(&mut self, allow_quantifier: bool) -> PatternResult<ParameterNode> {
        match self.peek() {
            Some(':') => self.parse_colon_parameter(allow_quantifier),
            Some('(') => self.parse_regex_parameter(allow_quantifier),
            _ => self.parse_wildcard(),
        }
    }

    fn parse_colon_parameter(&mut self, allow_quantifier: bool) -> PatternResult<ParameterNode> {
        let name_start_byte = self.current_byte_index();
        self.expect(':');
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            return Err(PatternError::ParameterMissingName {
                pattern: self.pattern.to_string(),
                index: name_start_byte,
            });
        }

        let first = name.as_bytes()[0];
        if !(first.is_ascii_alphabetic() || first == b'_') {
            return Err(PatternError::ParameterInvalidStart {
                pattern: self.pattern.to_string(),
                name: name.clone(),
                found: first as char,
            });
        }

        let constraint = if self.peek() == Some('(') {
            let raw = self.parse_inline_constraint(&name, name_start_byte)?;
            Some(ParameterConstraint::new(raw))
        } else {
            None
        };

        let quantifier = if allow_quantifier {
            self.parse_quantifier()
        } else {
            Quantifier::One
        };

        Ok(ParameterNode::new(
            ParamKey::Named(name),
            constraint,
            quantifier,
            ParamStyle::Colon,
        ))
    }

    fn parse_regex_parameter(&mut self, allow_quantifier: bool) -> PatternResult<ParameterNode> {
        let start = self.current_byte_index();
        let key = self.next_positional_key();
        let raw = self.parse_inline_constraint(&key.to_string(), start)?;
        let quantifier = if allow_quantifier {
            self.parse_quantifier()
        } else {
            Quantifier::One
        };
        Ok(ParameterNode::new(
            key,
            Some(ParameterConstraint::new(raw)),
            quantifier,
            ParamStyle::Regex,
        ))
    }

    fn parse_wildcard(&mut self) -> PatternResult<ParameterNode> {
        let index = self.current_byte_index();
        self.expect('*');
        if let Some(modifier @ ('?' | '*' | '+')) = self.peek() {
            return Err(PatternError::WildcardQuantifierUnsupported {
                pattern: self.pattern.to_string(),
                index,
                modifier,
            });
        }
        Ok(ParameterNode::new(
            self.next_positional_key(),
            Some(ParameterConstraint::new(WILDCARD_PATTERN.to_string())),
            Quantifier::One,
            ParamStyle::Wildcard,
        ))
    }

    fn parse_group(&mut self) -> PatternResult<PatternNode> {
        let start = self.current_byte_index();
        self.expect('{');
        let prefix = self.consume_group_text(start)?;
        let param = match self.peek() {
            Some(':' | '(' | '*') => Some(self.parse_parameter(false)?),
            _ => None,
        };
        let suffix = if param.is_some() {
            self.consume_group_text(start)?
        } else {
            String::new()
        };

        match self.peek() {
            Some('}') => {
                self.next();
            }
            Some(':' | '(' | '*') => {
                return Err(PatternError::GroupParameterLimit {
                    pattern: self.pattern.to_string(),
                    start,
                });
            }
            _ => {
                return Err(PatternError::UnterminatedGroup {
                    pattern: self.pattern.to_string(),
                    start,
                });
            }
        }

        let quantifier = self.parse_quantifier();
        match param {
            Some(param) => {
                let mut param = param.with_affixes(prefix, suffix);
                param.quantifier = quantifier;
                Ok(PatternNode::Parameter(param))
            }
            None if prefix.is_empty() => Err(PatternError::EmptyGroup {
                pattern: self.pattern.to_string(),
                start,
            }),
            None => Ok(PatternNode::Group(GroupNode::new(prefix, quantifier))),
        }
    }

    fn consume_group_text(&mut self, group_start: usize) -> PatternResult<String> {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                ':' | '(' | '*' | '}' => break,
                '{' => {
                    return Err(PatternError::NestedGroupNotAllowed {
                        pattern: self.pattern.to_string(),
                        index: self.current_byte_index(),
                    });
                }
                ')' => {
                    return Err(PatternError::UnexpectedClosingParenthesis {
                        pattern: self.pattern.to_string(),
                        index: self.current_byte_index(),
                    });
                }
                '?' | '+' => {
                    return Err(PatternError::DanglingQuantifier {
                        pattern: self.pattern.to_string(),
                        index: self.current_byte_index(),
                        modifier: ch,
                    });
                }
                '\\' => text.push(self.consume_escape_char()?),
                _ => {
                    text.push(ch);
                    self.next();
                }
            }
        }
        if self.peek().is_none() {
            return Err(PatternError::UnterminatedGroup {
                pattern: self.pattern.to_string(),
                start: group_start,
            });
        }
        Ok(text)
    }

    fn parse_inline_constraint(&mut self, name: &str, start_byte: usize) -> PatternResult<String> {
        self.expect('(');
        if self.peek() == Some('?') {
            return Err(PatternError::ConstraintStartsWithModifier {
                pattern: self.pattern.to_string(),
                name: name.to_string(),
            });
        }

        let mut depth = 1usize;
        let mut in_class = false;
        let mut constraint = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\\' {
                let escaped = self.consume_escape_char()?;
                constraint.push('\\');
                constraint.push(escaped);
                continue;
            }
            match ch {
                '[' if !in_class => {
                    in_class = true;
                    constraint.push(ch);
                    self.next();
                }
                ']' if in_class => {
                    in_class = false;
                    constraint.push(ch);
                    self.next();
                }
                '(' if !in_class => {
                    if self.opens_capturing_group() {
                        return Err(PatternError::CapturingGroupInConstraint {
                            pattern: self.pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    depth += 1;
                    constraint.push(ch);
                    self.next();
                }
                ')' if !in_class => {
                    depth -= 1;
                    self.next();
                    if depth == 0 {
                        if constraint.is_empty() {
                            return Err(PatternError::EmptyConstraint {
                                pattern: self.pattern.to_string(),
                                name: name.to_string(),
                            });
                        }
                        return Ok(constraint);
                    }
                    constraint.push(')');
                }
                _ => {
                    constraint.push(ch);
                    self.next();
                }
            }
        }

        Err(PatternError::UnterminatedParameterConstraint {
            pattern: self.pattern.to_string(),
            name: name.to_string(),
            start: start_byte,
        })
    }

    // Positioned on '('. `(?:`, `(?i)` and friends are fine; `(x`, `(?P<n>` and `(?<n>` capture.
    fn opens_capturing_group(&self) -> bool {
        match self.peek_at(1) {
            Some('?') => match (self.peek_at(2), self.peek_at(3)) {
                (Some('P'), Some('<')) => true,
                (Some('<'), Some(next)) => next != '=' && next != '!',
                _ => false,
            },
            _ => true,
        }
    }

    fn parse_quantifier(&mut self) -> Quantifier {
        match Quantifier::from_modifier(self.peek()) {
            Some(quantifier) => {
                self.next();
                quantifier
            }
            None => Quantifier::One,
        }
    }

    fn next_positional_key(&mut self) -> ParamKey {
        let key = ParamKey::Index(self.next_positional);
        self.next_positional += 1;
        key
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or(self.pattern.len())
    }

    fn consume_escape_char(&mut self) -> PatternResult<char> {
        let escape_index = self.current_byte_index();
        self.next();
        match self.next() {
            Some(ch) => Ok(ch),
            None => Err(PatternError::LoneEscapeCharacter {
                pattern: self.pattern.to_string(),
                index: escape_index,
            }),
        }
    }
}

fn flush_literal(literal: &mut String, nodes: &mut Vec<PatternNode>) {
    if literal.is_empty() {
        return;
    }
    nodes.push(PatternNode::Literal(std::mem::take(literal)));
}

fn validate_ast(ast: &PatternAst, pattern: &str) -> PatternResult<()> {
    validate_unique_names(ast, pattern)?;
    validate_constraints(ast, pattern)?;
    Ok(())
}

fn validate_unique_names(ast: &PatternAst, pattern: &str) -> PatternResult<()> {
    let mut seen = HashSet::new();
    for name in ast.parameters().filter_map(ParameterNode::name) {
        if !seen.insert(name) {
            return Err(PatternError::DuplicateParameterName {
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_constraints(ast: &PatternAst, pattern: &str) -> PatternResult<()> {
    for param in ast.parameters() {
        if let Some(constraint) = &param.constraint {
            let source = format!("^(?:{})$", constraint.raw);
            if let Err(err) = Regex::new(&source) {
                return Err(PatternError::RegexConstraintInvalid {
                    pattern: pattern.to_string(),
                    name: param.key.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }
    Ok(())
}
