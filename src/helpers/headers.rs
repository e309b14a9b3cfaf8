// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Reconstruction of `Name: value` header lines from a captured header block.

use crate::model::HeaderBlock;

/// Facts about the message being rebuilt that affect its header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderContext<'a> {
    /// Request headers; a `Host` line is synthesized when the block lacks one.
    Request {
        host: &'a str,
        port: u16,
        secure: bool,
    },
    Response,
}

/// True when `port` is the implicit port for the scheme.
pub fn is_default_port(port: u16, secure: bool) -> bool {
    (secure && port == 443) || (!secure && port == 80)
}

/// `host` or `host:port`, the port only appearing when it is not the default.
pub fn host_header_value(host: &str, port: u16, secure: bool) -> String {
    if is_default_port(port, secure) {
        host.to_string()
    } else {
        format!("{}:{}", host, port)
    }
}

/// Form-decode a header value, but only when it contains a `%`.
///
/// Once decoding kicks in, `+` also becomes a space. Values whose escapes
/// are malformed are kept as captured.
pub fn decode_header_value(value: &str) -> String {
    if !value.contains('%') {
        return value.to_string();
    }
    match crate::helpers::uri::percent_decode(value) {
        Ok(decoded) => decoded,
        Err(msg) => {
            tracing::debug!(value, reason = %msg, "header value kept undecoded");
            value.to_string()
        }
    }
}

/// Render the header block as CRLF-terminated lines, preserving source order.
///
/// Disabled entries and entries with an empty name are dropped. In request
/// context a `Host` line is appended when no enabled `Host` entry exists and
/// a host is known. The blank separator line is not included.
pub fn build_header_lines(block: Option<&HeaderBlock>, context: HeaderContext<'_>) -> String {
    let mut out = String::new();
    let mut has_host = false;

    for (key, entry) in block.into_iter().flat_map(|b| b.keyed_entries()) {
        if !entry.enabled() {
            continue;
        }
        let name = key.name();
        if name.eq_ignore_ascii_case("host") {
            has_host = true;
        }
        if name.is_empty() {
            continue;
        }
        let value = decode_header_value(entry.value.as_deref().unwrap_or(""));
        out.push_str(name);
        out.push_str(": ");
        out.push_str(&value);
        out.push_str("\r\n");
    }

    if let HeaderContext::Request { host, port, secure } = context {
        if !has_host && !host.is_empty() {
            out.push_str("Host: ");
            out.push_str(&host_header_value(host, port, secure));
            out.push_str("\r\n");
        }
    }

    out
}
