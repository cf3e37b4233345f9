//! Struct-tag mini-syntax used in `tools.go` annotations.
//!
//! An annotation is a space separated list of `key:"value"` pairs, e.g.
//! `binstub:"lint,-mod=mod"`. The value splits on commas into a name and
//! its options.

use std::str::CharIndices;

use crate::error::{BinstubsError, Result};

/// Unquoting failure carries just the reason; the caller adds the input.
type UnquoteResult<T> = std::result::Result<T, String>;

/// One parsed `key:"value"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    /// First comma separated piece of the value.
    pub name: String,
    /// Remaining pieces of the value.
    pub options: Vec<String>,
}

impl Tag {
    fn from_value(key: String, value: &str) -> Self {
        let mut pieces = value.split(',').map(str::to_string);
        let name = pieces.next().unwrap_or_default();
        Self {
            key,
            name,
            options: pieces.collect(),
        }
    }
}

/// Parse every tag in `input`.
pub fn parse_tags(input: &str) -> Result<Vec<Tag>> {
    let mut tags = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            break;
        }

        let key_len = rest
            .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\x7f')
            .unwrap_or(rest.len());
        if key_len == 0 {
            return Err(malformed(input, "tag key is empty"));
        }
        let key = &rest[..key_len];
        rest = &rest[key_len..];

        rest = rest
            .strip_prefix(":\"")
            .ok_or_else(|| malformed(input, &format!("tag '{}' is missing :\"value\"", key)))?;

        let (value, remaining) = take_quoted(rest).map_err(|reason| malformed(input, &reason))?;
        tags.push(Tag::from_value(key.to_string(), &value));
        rest = remaining;
    }

    Ok(tags)
}

/// Find the last tag with `key`.
pub fn find_tag<'a>(tags: &'a [Tag], key: &str) -> Option<&'a Tag> {
    tags.iter().rev().find(|tag| tag.key == key)
}

/// Read a Go-style double quoted value up to its closing quote, returning
/// it and the text after the quote.
///
/// Supports the `strconv.Unquote` escapes: `\a \b \f \n \r \t \v \\ \"`,
/// `\xHH`, `\ooo` (octal), `\uHHHH` and `\UHHHHHHHH`.
fn take_quoted(input: &str) -> UnquoteResult<(String, &str)> {
    let mut bytes = Vec::new();
    let mut chars = input.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => {
                let value = String::from_utf8(bytes)
                    .map_err(|_| "tag value is not valid UTF-8".to_string())?;
                return Ok((value, &input[idx + 1..]));
            }
            '\n' => return Err("newline in tag value".to_string()),
            '\\' => {
                let (_, escaped) = chars.next().ok_or("unterminated tag value")?;
                match escaped {
                    'a' => bytes.push(0x07),
                    'b' => bytes.push(0x08),
                    'f' => bytes.push(0x0c),
                    'n' => bytes.push(b'\n'),
                    'r' => bytes.push(b'\r'),
                    't' => bytes.push(b'\t'),
                    'v' => bytes.push(0x0b),
                    '\\' => bytes.push(b'\\'),
                    '"' => bytes.push(b'"'),
                    'x' => bytes.push(read_digits(&mut chars, 2, 16)? as u8),
                    '0'..='7' => {
                        let rest = read_digits(&mut chars, 2, 8)?;
                        let value = escaped.to_digit(8).unwrap_or(0) * 64 + rest;
                        let byte = u8::try_from(value)
                            .map_err(|_| format!("octal escape \\{:o} out of range", value))?;
                        bytes.push(byte);
                    }
                    'u' | 'U' => {
                        let width = if escaped == 'u' { 4 } else { 8 };
                        let code = read_digits(&mut chars, width, 16)?;
                        let ch = char::from_u32(code)
                            .ok_or_else(|| format!("invalid code point U+{:X}", code))?;
                        push_char(&mut bytes, ch);
                    }
                    other => return Err(format!("unknown escape \\{}", other)),
                }
            }
            other => push_char(&mut bytes, other),
        }
    }

    Err("unterminated tag value".to_string())
}

/// Read exactly `count` digits in `radix`.
fn read_digits(chars: &mut CharIndices<'_>, count: usize, radix: u32) -> UnquoteResult<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(radix))
            .ok_or_else(|| format!("expected {} base-{} digits in escape", count, radix))?;
        value = value * radix + digit;
    }
    Ok(value)
}

fn push_char(bytes: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

fn malformed(input: &str, reason: &str) -> BinstubsError {
    BinstubsError::MalformedAnnotation(format!("{} in `{}`", reason, input))
}
