// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Assembly of raw HTTP/1.1 messages: start line, headers, blank line, body.

use bytes::{BufMut, Bytes, BytesMut};

use crate::helpers::body::decode_body;
use crate::helpers::headers::{build_header_lines, HeaderContext};
use crate::model::{HeaderBlock, Response};
use crate::scalar::{resolve_status, resolve_version};

/// Emitted when a capture has no response section.
pub const PLACEHOLDER_RESPONSE: &[u8] = b"HTTP/1.1 0\r\n\r\n";

/// Resolved request line fields.
#[derive(Debug, Clone, Copy)]
pub struct RequestHead<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub version: &'a str,
}

/// Join a start line, rendered header lines and a body into one message.
///
/// A `Content-Length` line is appended after all other headers when the body
/// is non-empty and the source block declares none (enabled or not). A
/// declared value is never rewritten.
fn assemble(
    start_line: &str,
    mut header_lines: String,
    source: Option<&HeaderBlock>,
    body: &[u8],
) -> Bytes {
    let declared = source.is_some_and(|b| b.contains("Content-Length"));
    if !body.is_empty() && !declared {
        header_lines.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }

    let mut out = BytesMut::with_capacity(start_line.len() + header_lines.len() + 4 + body.len());
    out.put_slice(start_line.as_bytes());
    out.put_slice(b"\r\n");
    out.put_slice(header_lines.as_bytes());
    out.put_slice(b"\r\n");
    out.put_slice(body);
    out.freeze()
}

/// Build the raw request: `{method} {path} {version}`, headers, blank line, body.
pub fn build_request(
    head: &RequestHead<'_>,
    headers: Option<&HeaderBlock>,
    context: HeaderContext<'_>,
    body: &[u8],
) -> Bytes {
    let start_line = format!("{} {} {}", head.method, head.path, head.version);
    assemble(&start_line, build_header_lines(headers, context), headers, body)
}

/// Build the raw response, or the placeholder when none was captured.
///
/// The reason phrase and its leading space are omitted when no phrase could
/// be resolved.
pub fn build_response(response: Option<&Response>) -> Bytes {
    let Some(resp) = response else {
        return Bytes::from_static(PLACEHOLDER_RESPONSE);
    };

    let version = resolve_version(resp.version.as_ref());
    let status = resolve_status(resp.status.as_ref());
    let start_line = if status.phrase.is_empty() {
        format!("{} {}", version, status.code)
    } else {
        format!("{} {} {}", version, status.code, status.phrase)
    };

    let body = decode_body(resp.body_data.as_deref());
    let headers = resp.header.as_ref();
    assemble(
        &start_line,
        build_header_lines(headers, HeaderContext::Response),
        headers,
        &body,
    )
}
