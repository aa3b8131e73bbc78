//! Markdown-safe escaping for externally sourced strings
//!
//! License names, package locators, project names and dashboard URLs come
//! from the scanner and must not be able to alter the structure of the
//! rendered comment. Each function targets one insertion context and
//! escapes only what can break that context, so ordinary values like
//! `GPL-3.0` or `left-pad@1.3.0` pass through unchanged.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

/// Characters that would end or mangle a `(...)` link destination.
const LINK_DESTINATION: &AsciiSet = &CONTROLS.add(b' ').add(b'(').add(b')').add(b'<').add(b'>');

/// Everything except RFC 3986 unreserved characters. Strict enough to fold
/// a `custom+41069/project` locator into a single path segment.
const PATH_SEGMENT: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Escapes a value interpolated into inline Markdown text. Structural
/// punctuation is backslash-escaped and line breaks become spaces so the
/// value cannot start a new block.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' => {
                out.push('\\');
                out.push(ch);
            }
            '\r' | '\n' => out.push(' '),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes a value interpolated into a backtick code span, where backslash
/// escapes do not work. Backticks are dropped and line breaks become
/// spaces.
pub fn escape_code_span(raw: &str) -> String {
    raw.chars()
        .filter_map(|ch| match ch {
            '`' => None,
            '\r' | '\n' => Some(' '),
            other => Some(other),
        })
        .collect()
}

/// Percent-encodes a value used as a `(...)` link destination.
pub fn escape_link_destination(raw: &str) -> String {
    utf8_percent_encode(raw, LINK_DESTINATION).to_string()
}

/// Percent-encodes a value as one URL path segment.
pub fn encode_path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}
