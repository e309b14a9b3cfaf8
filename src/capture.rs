// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Export of imported entries: JSONL records and raw `.http` dumps.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::entry::ParsedEntry;

#[derive(Clone)]
pub struct CaptureWriter {
    file: ArcFile,
}

#[derive(Clone)]
struct ArcFile {
    inner: std::sync::Arc<Mutex<tokio::fs::File>>,
}

impl ArcFile {
    async fn new(path: &Path) -> anyhow::Result<Self> {
        let f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self {
            inner: std::sync::Arc::new(Mutex::new(f)),
        })
    }

    async fn write_line(&self, line: &str) -> anyhow::Result<()> {
        let mut file = self.inner.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}

impl CaptureWriter {
    /// Open (or create) a JSONL file for appending.
    pub async fn new<P: Into<PathBuf>>(path: P) -> anyhow::Result<Self> {
        let path: PathBuf = path.into();
        let file = ArcFile::new(&path).await?;
        Ok(Self { file })
    }

    /// Append one entry; `index` is its position in the import.
    pub async fn write_entry(&self, index: usize, entry: &ParsedEntry) -> anyhow::Result<()> {
        let record = CaptureRecord::from_entry(index, entry);
        let line = serde_json::to_string(&record)?;
        self.file.write_line(&line).await?;
        Ok(())
    }

    /// Append every entry in order.
    pub async fn write_entries(&self, entries: &[ParsedEntry]) -> anyhow::Result<()> {
        for (index, entry) in entries.iter().enumerate() {
            self.write_entry(index, entry).await?;
        }
        Ok(())
    }
}

/// One exported entry. Raw messages are base64 encoded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CaptureRecord {
    pub id: String,
    pub imported_at: String,
    pub index: usize,
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub method: String,
    pub path: String,
    pub status: String,
    #[serde(
        serialize_with = "crate::serde_helpers::serialize_base64",
        deserialize_with = "crate::serde_helpers::deserialize_base64"
    )]
    pub request: Bytes,
    #[serde(
        serialize_with = "crate::serde_helpers::serialize_base64",
        deserialize_with = "crate::serde_helpers::deserialize_base64"
    )]
    pub response: Bytes,
}

impl CaptureRecord {
    /// Build a record (generates ID and timestamp).
    pub fn from_entry(index: usize, entry: &ParsedEntry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            imported_at: chrono::Utc::now().to_rfc3339(),
            index,
            host: entry.host().to_string(),
            port: entry.port(),
            secure: entry.secure(),
            method: entry.method().to_string(),
            path: entry.path().to_string(),
            status: entry.status_code_text(),
            request: entry.request_bytes().clone(),
            response: entry.response_bytes().clone(),
        }
    }

    /// Rebuild the entry this record was exported from.
    pub fn to_entry(&self) -> ParsedEntry {
        ParsedEntry::new(
            self.host.clone(),
            self.port,
            self.secure,
            self.method.clone(),
            self.path.clone(),
            self.request.clone(),
            self.response.clone(),
        )
    }
}

/// Load capture records from a JSONL file
///
/// Reads the file line-by-line and deserializes each line as a CaptureRecord.
/// Malformed lines are skipped with a warning logged. A missing file yields
/// no records.
pub async fn load_captures<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<CaptureRecord>> {
    use tokio::io::AsyncBufReadExt;

    let path_ref = path.as_ref();

    if !tokio::fs::try_exists(path_ref).await.unwrap_or(false) {
        return Ok(Vec::new());
    }

    let file = tokio::fs::File::open(path_ref).await?;
    let reader = tokio::io::BufReader::new(file);
    let mut lines = reader.lines();
    let mut records = Vec::new();
    let mut line_num = 0;

    while let Some(line) = lines.next_line().await? {
        line_num += 1;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<CaptureRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(line = line_num, error = %e, "failed to parse capture record, skipping");
            }
        }
    }

    Ok(records)
}

/// Write each entry's raw messages to `dir` as `NNNN.request.http` and
/// `NNNN.response.http` (index zero-padded to four digits). Returns the
/// number of entries written.
pub async fn dump_raw_messages<P: AsRef<Path>>(
    entries: &[ParsedEntry],
    dir: P,
) -> anyhow::Result<usize> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    for (index, entry) in entries.iter().enumerate() {
        tokio::fs::write(
            dir.join(format!("{:04}.request.http", index)),
            entry.request_bytes(),
        )
        .await?;
        tokio::fs::write(
            dir.join(format!("{:04}.response.http", index)),
            entry.response_bytes(),
        )
        .await?;
    }
    Ok(entries.len())
}
