// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared test utilities to reduce duplication across test modules.

use std::io::Write;
use std::path::PathBuf;

use uuid::Uuid;

/// Unique path in the temp directory; the file is not created.
pub fn make_temp_path(tag: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("proxylog_{}_{}.{}", tag, Uuid::new_v4(), ext))
}

/// Write a zip archive with the given members and directory entries.
pub fn write_archive(tag: &str, files: &[(&str, &[u8])], dirs: &[&str]) -> anyhow::Result<PathBuf> {
    let path = make_temp_path(tag, "proxymanlogv2");
    let file = std::fs::File::create(&path)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for dir in dirs {
        zip.add_directory(*dir, options)?;
    }
    for (name, data) in files {
        zip.start_file(*name, options)?;
        zip.write_all(data)?;
    }
    zip.finish()?;
    Ok(path)
}

/// Minimal archive member JSON for a plain-HTTP GET-style transaction.
pub fn member_json(method: &str, path: &str, status: u16) -> String {
    serde_json::json!({
        "request": {
            "method": method,
            "fullPath": path,
            "version": "HTTP/1.1",
            "host": "example.com",
            "port": 80,
            "isSSL": false,
            "header": {"entries": []}
        },
        "response": {
            "status": status,
            "version": "HTTP/1.1",
            "header": {"entries": []}
        }
    })
    .to_string()
}
