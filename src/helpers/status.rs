// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

/// Reason phrase filled in when a capture carries a status code but no
/// phrase. Codes outside this table get no phrase at all.
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        415 => "Unsupported Media Type",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

/// Return the status code token of a serialized response: the second
/// whitespace-separated field of its first line. Empty if there is none.
pub fn status_token(message: &[u8]) -> String {
    let end = message
        .windows(2)
        .position(|w| w == b"\r\n")
        .filter(|p| *p > 0)
        .or_else(|| message.iter().position(|b| *b == b'\n').filter(|p| *p > 0))
        .unwrap_or(message.len());
    String::from_utf8_lossy(&message[..end])
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string()
}
