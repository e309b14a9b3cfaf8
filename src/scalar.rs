// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Resolution of polymorphic scalar fields (method, HTTP version, status).
//!
//! Each field kind has its own rules; all of them fall back to a default
//! instead of failing, so a message can always be built.

use crate::model::Scalar;
use serde_json::{Map, Number, Value};

pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Keys probed, in order, when a string-like field is encoded as an object.
const STRING_LIKE_KEYS: [&str; 4] = ["name", "value", "rawValue", "version"];

/// Resolved status code and reason phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: u16,
    pub phrase: String,
}

/// Resolve a generic string-like field. Strings are used verbatim, objects
/// are probed for a string under a well-known key, anything else is
/// stringified. Absent values resolve to an empty string.
pub fn resolve_string_like(value: Option<&Scalar>) -> String {
    match value {
        None => String::new(),
        Some(Scalar::Text(s)) => s.clone(),
        Some(Scalar::Number(n)) => n.to_string(),
        Some(Scalar::Object(map)) => STRING_LIKE_KEYS
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| Value::Object(map.clone()).to_string()),
        Some(Scalar::Other(v)) => v.to_string(),
    }
}

/// Request method, defaulting to `GET` when nothing usable was captured.
pub fn resolve_method(value: Option<&Scalar>) -> String {
    let method = resolve_string_like(value);
    if method.is_empty() {
        DEFAULT_METHOD.to_string()
    } else {
        method
    }
}

/// HTTP version token for a start line or status line.
///
/// Bare numeric strings (`1.1`, `2`) gain an `HTTP/` prefix; numbers and
/// object fields are used as written. Objects are read as `name`, then
/// `major`/`minor`, then `value`. Anything unresolved yields `HTTP/1.1`.
pub fn resolve_version(value: Option<&Scalar>) -> String {
    let resolved = match value {
        None | Some(Scalar::Other(_)) => None,
        Some(Scalar::Text(s)) => non_blank(s).map(with_http_prefix),
        Some(Scalar::Number(n)) => Some(n.to_string()),
        Some(Scalar::Object(map)) => version_from_object(map),
    };
    resolved.unwrap_or_else(|| DEFAULT_VERSION.to_string())
}

fn version_from_object(map: &Map<String, Value>) -> Option<String> {
    if let Some(name) = map.get("name").and_then(Value::as_str).and_then(non_blank) {
        return Some(name);
    }
    let major = map.get("major").and_then(lenient_int);
    let minor = map.get("minor").and_then(lenient_int);
    if let (Some(major), Some(minor)) = (major, minor) {
        return Some(format!("HTTP/{}.{}", major, minor));
    }
    map.get("value").and_then(Value::as_str).and_then(non_blank)
}

fn with_http_prefix(v: String) -> String {
    let has_prefix = v
        .get(..5)
        .is_some_and(|p| p.eq_ignore_ascii_case("HTTP/"));
    if !has_prefix && is_bare_version(&v) {
        format!("HTTP/{}", v)
    } else {
        v
    }
}

/// Matches `major[.minor]` where both parts are ASCII digits.
fn is_bare_version(s: &str) -> bool {
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    match s.split_once('.') {
        Some((major, minor)) => all_digits(major) && all_digits(minor),
        None => all_digits(s),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

/// Integer from a number or numeric string; fractions are truncated.
fn lenient_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

/// Resolve a response status. Numbers and numeric strings carry no phrase;
/// objects provide `code` and `phrase`. An empty phrase is replaced from the
/// standard reason table, and an unknown code keeps it empty.
pub fn resolve_status(value: Option<&Scalar>) -> StatusLine {
    let (code, phrase) = match value {
        Some(Scalar::Number(n)) => (status_code_from_number(n), String::new()),
        Some(Scalar::Text(s)) => (status_code_from_str(s), String::new()),
        Some(Scalar::Object(map)) => {
            let code = match map.get("code") {
                Some(Value::Number(n)) => status_code_from_number(n),
                Some(Value::String(s)) => status_code_from_str(s),
                _ => 0,
            };
            let phrase = map
                .get("phrase")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            (code, phrase)
        }
        None | Some(Scalar::Other(_)) => (0, String::new()),
    };

    let phrase = if phrase.is_empty() {
        crate::helpers::status::reason_phrase(code).to_string()
    } else {
        phrase
    };
    StatusLine { code, phrase }
}

fn status_code_from_number(n: &Number) -> u16 {
    n.as_u64()
        .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .and_then(|c| u16::try_from(c).ok())
        .unwrap_or(0)
}

fn status_code_from_str(s: &str) -> u16 {
    s.trim().parse::<u16>().unwrap_or(0)
}
