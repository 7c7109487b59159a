use memchr::memchr_iter;
use percent_encoding::{
    AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};

use crate::path::{PathError, PathResult};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Pattern literals keep reserved characters and existing escapes.
const LITERAL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Encodes each `/`-separated segment on its own, keeping the separators.
pub fn encode_segments(value: &str) -> String {
    value
        .split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn encode_literal(value: &str) -> String {
    utf8_percent_encode(value, LITERAL).to_string()
}

/// Strict percent-decoding: every `%` must start a two-digit hex escape and the
/// decoded bytes must form UTF-8.
pub fn decode_component(input: &str) -> PathResult<String> {
    let bytes = input.as_bytes();
    for index in memchr_iter(b'%', bytes) {
        let well_formed = bytes.get(index + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(index + 2).is_some_and(u8::is_ascii_hexdigit);
        if !well_formed {
            return Err(PathError::InvalidPercentEncoding {
                input: input.to_string(),
                index,
            });
        }
    }

    percent_decode_str(input)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| PathError::InvalidUtf8AfterDecoding {
            input: input.to_string(),
        })
}
