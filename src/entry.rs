// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Reconstructed transaction handed to consumers of an import.

use bytes::Bytes;

use crate::helpers::headers::host_header_value;
use crate::helpers::status::status_token;

const TITLE_MAX_CHARS: usize = 48;

/// One reconstructed transaction: target service, request line summary and
/// the raw request/response messages. Values are never modified after the
/// decoder builds them; `Bytes` clones share the same buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    host: String,
    port: u16,
    secure: bool,
    method: String,
    path: String,
    request: Bytes,
    response: Bytes,
}

impl ParsedEntry {
    pub fn new(
        host: String,
        port: u16,
        secure: bool,
        method: String,
        path: String,
        request: Bytes,
        response: Bytes,
    ) -> Self {
        Self {
            host,
            port,
            secure,
            method,
            path,
            request,
            response,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Origin-form request target.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw HTTP/1.1 request bytes.
    pub fn request_bytes(&self) -> &Bytes {
        &self.request
    }

    /// Raw HTTP/1.1 response bytes (a placeholder when none was captured).
    pub fn response_bytes(&self) -> &Bytes {
        &self.response
    }

    /// `http(s)://host[:port]`, the port shown only when not the default.
    pub fn origin(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!(
            "{}://{}",
            scheme,
            host_header_value(&self.host, self.port, self.secure)
        )
    }

    /// Status code token of the response status line (`"0"` for placeholders).
    pub fn status_code_text(&self) -> String {
        status_token(&self.response)
    }

    /// `method host path status`, the text that list filters match against.
    pub fn summary_line(&self) -> String {
        format!(
            "{} {} {} {}",
            self.method,
            self.host,
            self.path,
            self.status_code_text()
        )
    }

    /// Case-insensitive substring match against [`Self::summary_line`].
    /// A blank query matches every entry.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty() || self.summary_line().to_lowercase().contains(&q)
    }

    /// Short display label: method and path without query, at most 48 chars.
    pub fn title(&self) -> String {
        let path = match self.path.find('?') {
            Some(q) if q > 0 => &self.path[..q],
            _ if self.path.is_empty() => "/",
            _ => self.path.as_str(),
        };
        let title = format!("{} {}", self.method, path);
        if title.chars().count() > TITLE_MAX_CHARS {
            let mut cut: String = title.chars().take(TITLE_MAX_CHARS - 3).collect();
            cut.push_str("...");
            cut
        } else {
            title
        }
    }
}

/// Entries matching `query`, paired with their position in `entries`.
pub fn filter_entries<'a>(entries: &'a [ParsedEntry], query: &str) -> Vec<(usize, &'a ParsedEntry)> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.matches(query))
        .collect()
}
