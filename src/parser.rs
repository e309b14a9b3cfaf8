// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Archive import: member decoding and the batch loop around it.
//!
//! Only container-level failures abort an import. A member whose JSON does
//! not decode, or that lacks a request section, is skipped and reported in
//! [`ImportReport::skipped`]; every other field problem falls back to a
//! default while the message is being rebuilt.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::archive::{list_members, open_archive, read_member, DEFAULT_MEMBER_PREFIX};
use crate::entry::ParsedEntry;
use crate::error::Result;
use crate::helpers::body::decode_body;
use crate::helpers::headers::HeaderContext;
use crate::helpers::uri::{absolute_authority, normalize_path};
use crate::message::{build_request, build_response, RequestHead};
use crate::model::{LogEntry, Request, Response};
use crate::scalar::{resolve_method, resolve_version};

/// Why a member was left out of the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The member is not a JSON document of the expected shape
    InvalidJson(String),
    /// The document decoded but has no `request` section
    MissingRequest,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidJson(e) => write!(f, "invalid JSON: {}", e),
            SkipReason::MissingRequest => f.write_str("missing request section"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMember {
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of an import: decoded entries in archive order plus diagnostics.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub entries: Vec<ParsedEntry>,
    pub skipped: Vec<SkippedMember>,
    /// True when the caller stopped the import before every member was read.
    pub cancelled: bool,
}

/// Knobs for an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Only members whose name starts with this prefix are decoded.
    pub member_prefix: String,
    /// Decode threads. `0` and `1` decode inline while reading.
    pub workers: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            member_prefix: DEFAULT_MEMBER_PREFIX.to_string(),
            workers: 1,
        }
    }
}

/// Parse every transaction in the archive with default options.
pub fn parse_archive<P: AsRef<Path>>(path: P) -> Result<Vec<ParsedEntry>> {
    parse_archive_with(path, &ImportOptions::default()).map(|r| r.entries)
}

/// Parse the archive, returning entries together with skipped members.
pub fn parse_archive_with<P: AsRef<Path>>(path: P, options: &ImportOptions) -> Result<ImportReport> {
    parse_archive_until(path, options, |_| true)
}

/// Parse the archive, consulting `should_continue` before each member read.
///
/// The callback receives the number of members read so far. Returning
/// `false` stops reading; members already read are still decoded and the
/// report is marked cancelled. The archive is closed on every exit path.
pub fn parse_archive_until<P, F>(path: P, options: &ImportOptions, mut should_continue: F) -> Result<ImportReport>
where
    P: AsRef<Path>,
    F: FnMut(usize) -> bool,
{
    let path = path.as_ref();
    let mut report = ImportReport::default();
    let parallel = options.workers > 1;
    let mut pending: Vec<(String, Vec<u8>)> = Vec::new();

    {
        let mut archive = open_archive(path)?;
        let names = list_members(&archive, &options.member_prefix);
        tracing::debug!(archive = %path.display(), members = names.len(), "importing archive");

        for (read, name) in names.into_iter().enumerate() {
            if !should_continue(read) {
                tracing::info!(read, "import stopped by caller");
                report.cancelled = true;
                break;
            }
            let raw = read_member(&mut archive, &name)?;
            if parallel {
                pending.push((name, raw));
            } else {
                let outcome = decode_member(&raw);
                record_outcome(&mut report, name, outcome);
            }
        }
    }

    if parallel {
        for (name, outcome) in decode_parallel(pending, options.workers) {
            record_outcome(&mut report, name, outcome);
        }
    }

    Ok(report)
}

fn record_outcome(
    report: &mut ImportReport,
    name: String,
    outcome: std::result::Result<ParsedEntry, SkipReason>,
) {
    match outcome {
        Ok(entry) => report.entries.push(entry),
        Err(reason) => {
            tracing::warn!(member = %name, reason = %reason, "skipping archive member");
            report.skipped.push(SkippedMember { name, reason });
        }
    }
}

/// Decode members on a pool of scoped threads; output keeps input order.
fn decode_parallel(
    members: Vec<(String, Vec<u8>)>,
    workers: usize,
) -> Vec<(String, std::result::Result<ParsedEntry, SkipReason>)> {
    let slots: Vec<Mutex<Option<std::result::Result<ParsedEntry, SkipReason>>>> =
        members.iter().map(|_| Mutex::new(None)).collect();
    let next = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        let jobs = workers.min(members.len().max(1));
        for _ in 0..jobs {
            scope.spawn(|| loop {
                let idx = next.fetch_add(1, Ordering::Relaxed);
                let Some((_, raw)) = members.get(idx) else {
                    return;
                };
                let outcome = decode_member(raw);
                if let Ok(mut slot) = slots[idx].lock() {
                    *slot = Some(outcome);
                }
            });
        }
    });

    members
        .into_iter()
        .zip(slots)
        .map(|((name, raw), slot)| {
            let outcome = slot
                .into_inner()
                .ok()
                .flatten()
                .unwrap_or_else(|| decode_member(&raw));
            (name, outcome)
        })
        .collect()
}

/// Decode one member's bytes into an entry, or say why it must be skipped.
pub fn decode_member(raw: &[u8]) -> std::result::Result<ParsedEntry, SkipReason> {
    let text = String::from_utf8_lossy(raw);
    let log: LogEntry =
        serde_json::from_str(&text).map_err(|e| SkipReason::InvalidJson(e.to_string()))?;
    let request = log.request.as_ref().ok_or(SkipReason::MissingRequest)?;
    Ok(build_entry(request, log.response.as_ref()))
}

/// TLS flag: `isSSL` when captured, otherwise inferred from the scheme or an
/// absolute `https://` target.
fn is_secure(request: &Request, full_path: &str) -> bool {
    request.is_ssl.unwrap_or_else(|| match request.scheme.as_deref() {
        Some(s) if !s.trim().is_empty() => s.trim().eq_ignore_ascii_case("https"),
        _ => full_path.trim_start().starts_with("https://"),
    })
}

/// Rebuild the request/response pair of one captured transaction.
pub fn build_entry(request: &Request, response: Option<&Response>) -> ParsedEntry {
    let full_path = request.full_path.as_deref().unwrap_or("");
    let secure = is_secure(request, full_path);

    let mut host = request.host.clone().unwrap_or_default();
    let mut port = request.port;
    if host.is_empty() {
        if let Some((uri_host, uri_port)) = absolute_authority(full_path) {
            host = uri_host;
            port = port.or(uri_port);
        }
    }
    let port = port.unwrap_or(if secure { 443 } else { 80 });

    let method = resolve_method(request.method.as_ref());
    let path = normalize_path(full_path);
    let version = resolve_version(request.version.as_ref());
    let body = decode_body(request.body_data.as_deref());

    let head = RequestHead {
        method: &method,
        path: &path,
        version: &version,
    };
    let context = HeaderContext::Request {
        host: &host,
        port,
        secure,
    };
    let request_bytes = build_request(&head, request.header.as_ref(), context, &body);
    let response_bytes = build_response(response);

    ParsedEntry::new(host, port, secure, method, path, request_bytes, response_bytes)
}
