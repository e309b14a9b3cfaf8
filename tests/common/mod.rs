// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use std::io::Write;
use std::path::PathBuf;

/// Unique path in the temp directory; the file is not created.
pub fn make_temp_path(tag: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "proxylog_integ_{}_{}.{}",
        tag,
        uuid::Uuid::new_v4(),
        ext
    ))
}

/// Build an archive whose members are listed in the given order, preceded by
/// a directory entry that must never be imported.
pub fn write_archive(tag: &str, files: &[(&str, String)]) -> anyhow::Result<PathBuf> {
    let path = make_temp_path(tag, "proxymanlogv2");
    let file = std::fs::File::create(&path)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    zip.add_directory("request_attachments/", options)?;
    for (name, data) in files {
        zip.start_file(*name, options)?;
        zip.write_all(data.as_bytes())?;
    }
    zip.finish()?;
    Ok(path)
}
