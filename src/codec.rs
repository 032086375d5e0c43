//! Raw-text encodings for every [`Value`] variant.
//!
//! | Variant      | Raw form                                              |
//! |--------------|-------------------------------------------------------|
//! | `Bool`       | `1` / `0`                                             |
//! | `Int32/64`   | decimal                                               |
//! | `Text`       | the string itself; null has no raw form               |
//! | `StringList` | comma-joined, each field percent-encoded              |
//! | `IntList`    | comma-joined decimals                                 |
//!
//! String list fields use URI component escaping: everything outside the
//! RFC 3986 unreserved set (`A-Z a-z 0-9 - . _ ~`) is escaped, so commas,
//! `=` and newlines never reach the file unescaped.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::FlatfigError;
use crate::value::{Value, ValueKind};

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encode a value into its raw text. Returns `None` only for the null string.
pub fn encode(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Int32(i) => Some(i.to_string()),
        Value::Int64(i) => Some(i.to_string()),
        Value::Text(t) => t.clone(),
        Value::StringList(list) => Some(encode_string_list(list)),
        Value::IntList(list) => Some(encode_int_list(list)),
    }
}

pub fn encode_string_list(list: &[String]) -> String {
    list.iter()
        .map(|s| utf8_percent_encode(s, COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn encode_int_list(list: &[i32]) -> String {
    list.iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// `true` iff the first character is `'1'`. An empty string is `false`.
pub fn decode_bool(raw: &str) -> bool {
    raw.starts_with('1')
}

pub fn decode_i32(key: &str, raw: &str) -> Result<i32, FlatfigError> {
    raw.trim()
        .parse()
        .map_err(|_| malformed(key, raw, ValueKind::Int32))
}

pub fn decode_i64(key: &str, raw: &str) -> Result<i64, FlatfigError> {
    raw.trim()
        .parse()
        .map_err(|_| malformed(key, raw, ValueKind::Int64))
}

/// Split on commas and percent-decode each field.
///
/// Fields that are blank after decoding are gaps and are dropped, so
/// `"a,,b"` yields `["a", "b"]` and `""` yields an empty list. A field whose
/// escapes do not decode to UTF-8 (`%FF`) is kept as literal text.
pub fn decode_string_list(_key: &str, raw: &str) -> Result<Vec<String>, FlatfigError> {
    let mut out = Vec::new();
    for field in raw.trim().split(',') {
        let decoded = percent_decode_str(field)
            .decode_utf8()
            .unwrap_or(Cow::Borrowed(field));
        if decoded.trim().is_empty() {
            continue;
        }
        out.push(decoded.into_owned());
    }
    Ok(out)
}

/// Split on commas and parse each field as a decimal `i32`.
///
/// An empty string is the encoding of an empty list.
pub fn decode_int_list(key: &str, raw: &str) -> Result<Vec<i32>, FlatfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|field| {
            field
                .trim()
                .parse()
                .map_err(|_| malformed(key, raw, ValueKind::IntList))
        })
        .collect()
}

fn malformed(key: &str, raw: &str, expected: ValueKind) -> FlatfigError {
    FlatfigError::MalformedValue {
        key: key.into(),
        raw: raw.into(),
        expected,
    }
}
