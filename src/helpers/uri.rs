// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Small URI helpers: percent-decoding and request-target normalization.

/// Check percent-encoding runs inside a string. Returns `Some(msg)` describing the
/// first problem found, or `None` if all percent-encodings look well-formed.
pub fn check_percent_encoding(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len {
        if bytes[i] == b'%' {
            if i + 2 >= len {
                return Some(
                    "Percent-encoding incomplete: '%' must be followed by two hex digits".into(),
                );
            }
            let hi = bytes[i + 1];
            let lo = bytes[i + 2];
            if !hi.is_ascii_hexdigit() || !lo.is_ascii_hexdigit() {
                let seq = String::from_utf8_lossy(&bytes[i..i + 3]);
                return Some(format!("Invalid percent-encoding '{}'", seq));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    None
}

/// Decode `%XX` escapes and turn `+` into a space, as form decoding does.
/// Returns `Err(msg)` when an escape is malformed. Decoded bytes that are
/// not UTF-8 are replaced with U+FFFD.
pub fn percent_decode(s: &str) -> Result<String, String> {
    if let Some(msg) = check_percent_encoding(s) {
        return Err(msg);
    }

    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                // validated above: two hex digits follow
                out.push((hex_val(bytes[i + 1]) << 4) | hex_val(bytes[i + 2]));
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

fn is_absolute_http(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Raw pieces of an absolute `http(s)` request target, borrowed from the input.
#[derive(Debug, PartialEq, Eq)]
struct AbsoluteTarget<'a> {
    secure: bool,
    authority: &'a str,
    path: &'a str,
    query: Option<&'a str>,
}

/// Characters allowed unescaped in a URI component. Non-ASCII text is
/// accepted as long as it is neither whitespace nor a control character.
fn is_uri_char(c: char) -> bool {
    if !c.is_ascii() {
        return !c.is_control() && !c.is_whitespace();
    }
    c.is_ascii_alphanumeric() || "-._~:/?@!$&'()*+,;=%".contains(c)
}

/// Split an absolute `http(s)` target without normalizing any part of it.
///
/// Dot segments and escapes stay exactly as captured. Returns `None` when
/// the text is not a well-formed URI: illegal characters (space, `\`,
/// `"`, ...), malformed escapes, or an authority that does not parse.
fn split_absolute(s: &str) -> Option<AbsoluteTarget<'_>> {
    let (secure, rest) = match s.strip_prefix("https://") {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix("http://")?),
    };
    if check_percent_encoding(rest).is_some() {
        return None;
    }

    let (rest, fragment) = match rest.split_once('#') {
        Some((r, f)) => (r, Some(f)),
        None => (rest, None),
    };
    let authority_end = rest.find(|c| c == '/' || c == '?').unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_end);
    let (path, query) = match tail.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (tail, None),
    };

    let legal = authority
        .chars()
        .all(|c| is_uri_char(c) || c == '[' || c == ']')
        && path.chars().all(is_uri_char)
        && query.map_or(true, |q| q.chars().all(is_uri_char))
        && fragment.map_or(true, |f| f.chars().all(is_uri_char));
    if !legal {
        return None;
    }
    if !authority.is_empty() && parse_authority(authority).is_none() {
        return None;
    }

    Some(AbsoluteTarget {
        secure,
        authority,
        path,
        query,
    })
}

/// Host and port of an authority component, validated by hyper's URI parser.
fn parse_authority(authority: &str) -> Option<(String, Option<u16>)> {
    let uri: hyper::Uri = format!("http://{}/", authority).parse().ok()?;
    let host = uri.host().filter(|h| !h.is_empty())?.to_string();
    Some((host, uri.port_u16()))
}

/// Reduce a captured request target to origin-form (`path[?query]`).
///
/// Absolute `http(s)` URIs lose their scheme, authority and fragment; the
/// raw path and query are kept byte for byte and an empty path becomes `/`.
/// Targets that are not well-formed URIs, and targets already in
/// origin-form, pass through unchanged (after trimming). An empty input
/// yields `/`.
pub fn normalize_path(full_path: &str) -> String {
    let s = full_path.trim();
    if s.is_empty() {
        return "/".to_string();
    }

    if let Some(target) = split_absolute(s) {
        let mut out = if target.path.is_empty() {
            "/".to_string()
        } else {
            target.path.to_string()
        };
        if let Some(q) = target.query.filter(|q| !q.is_empty()) {
            out.push('?');
            out.push_str(q);
        }
        return out;
    }

    if is_absolute_http(s) {
        tracing::debug!(target_uri = %s, "absolute request target did not parse, keeping it verbatim");
    }
    s.to_string()
}

/// Host and explicit port of an absolute `http(s)` request target.
///
/// The port is `None` when the URI omits it or names the scheme default.
pub fn absolute_authority(full_path: &str) -> Option<(String, Option<u16>)> {
    let target = split_absolute(full_path.trim())?;
    let (host, port) = parse_authority(target.authority)?;
    let port = port.filter(|p| !crate::helpers::headers::is_default_port(*p, target.secure));
    Some((host, port))
}
