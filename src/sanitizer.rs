// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Input sanitization for contact form fields.
//!
//! Every function is total: any string in, a string (or a bool for the
//! detector) out. None of this is a trust boundary. The submission endpoint
//! must validate again; these only narrow what the form sends and give the
//! UI something to warn about.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Default cap for free-text fields, in characters.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1000;

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern compiles"))
}

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?s)<!--.*?(?:-->|$)")
}

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?is)<script\b[^>]*>.*?(?:</script\s*>|$)")
}

fn style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?is)<style\b[^>]*>.*?(?:</style\s*>|$)")
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"<[a-zA-Z/!?][^>]*(?:>|$)")
}

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);")
}

fn sql_keyword_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        r"(?i)\b(?:select|insert|update|delete|drop|create|alter|exec|union)\b",
    )
}

fn sql_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"--|/\*|\*/")
}

/// Strip markup, returning text content only.
///
/// Comments are removed, `<script>` and `<style>` elements are dropped
/// together with their contents (an unterminated one swallows the rest of
/// the input), every other tag is removed with its attributes, and
/// character references are decoded.
pub fn sanitize_html(input: &str) -> String {
    let text = comment_re().replace_all(input, "");
    let text = script_re().replace_all(&text, "");
    let text = style_re().replace_all(&text, "");
    let text = tag_re().replace_all(&text, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    entity_re()
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[1];
            let decoded = match body.strip_prefix('#') {
                Some(num) => {
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.map(|c| match c {
                        0 => char::REPLACEMENT_CHARACTER,
                        c => char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER),
                    })
                }
                None => match body {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                },
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Trim, lowercase and keep only `[a-z0-9._@+-]`.
///
/// Narrows the character set; does not check the address shape.
pub fn sanitize_email(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '@' | '+' | '-'))
        .collect()
}

/// Trim, drop ASCII control characters, then cap at `max_length` characters.
pub fn sanitize_text(input: &str, max_length: usize) -> String {
    input
        .trim()
        .chars()
        .filter(|&c| !is_control(c))
        .take(max_length)
        .collect()
}

/// Keep digits, `+`, `(`, `)`, space and `-`.
pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '(' | ')' | ' ' | '-'))
        .collect()
}

/// Heuristic SQL-injection shape detector.
///
/// Flags SQL keywords, comment markers and any of `;`, `'`, `"`. Legitimate
/// prose trips it often; use it for an inline warning, never to block.
pub fn has_sql_injection(input: &str) -> bool {
    sql_keyword_re().is_match(input)
        || sql_comment_re().is_match(input)
        || input.contains([';', '\'', '"'])
}

fn is_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{1f}' | '\u{7f}')
}
