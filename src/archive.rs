// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Archive container access and member ordering.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::error::{ImportError, Result};

/// Naming convention for members holding one captured transaction.
pub const DEFAULT_MEMBER_PREFIX: &str = "request_";

/// Width the numeric suffix is zero-padded to when deriving sort keys.
const SORT_PAD_WIDTH: usize = 6;

/// Open the archive at `path`. A missing path or a corrupt container is fatal.
pub fn open_archive(path: &Path) -> Result<ZipArchive<File>> {
    if !path.is_file() {
        return Err(ImportError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    ZipArchive::new(file).map_err(|source| ImportError::Archive {
        path: path.to_path_buf(),
        source,
    })
}

/// Ordering key for a member name.
///
/// The text after the first `_` is read as a signed decimal and zero-padded
/// so that `request_2` sorts before `request_10`. Names without a numeric
/// tail use the raw name.
pub fn sort_key(name: &str) -> String {
    if let Some(idx) = name.find('_') {
        let tail = &name[idx + 1..];
        if !tail.is_empty() {
            if let Ok(n) = tail.trim().parse::<i32>() {
                return format!("{}{:0width$}", &name[..=idx], n, width = SORT_PAD_WIDTH);
            }
        }
    }
    name.to_string()
}

fn is_directory_name(name: &str) -> bool {
    name.ends_with('/') || name.ends_with('\\')
}

/// Filter `names` to transaction members and put them in processing order.
///
/// Directory pseudo-entries and names without `prefix` are dropped. The sort
/// is stable, so members sharing a key keep their listing order.
pub fn select_members<'a, I>(names: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut selected: Vec<String> = names
        .into_iter()
        .filter(|n| !is_directory_name(n) && n.starts_with(prefix))
        .map(str::to_string)
        .collect();
    selected.sort_by_cached_key(|n| sort_key(n));
    selected
}

/// List transaction members of an open archive in processing order.
pub fn list_members<R: Read + Seek>(archive: &ZipArchive<R>, prefix: &str) -> Vec<String> {
    select_members(archive.file_names(), prefix)
}

/// Read one member fully. The member stream is released before returning.
pub fn read_member<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Vec<u8>> {
    let mut member = archive.by_name(name).map_err(|source| ImportError::Member {
        name: name.to_string(),
        source,
    })?;
    let mut buf = Vec::with_capacity(usize::try_from(member.size()).unwrap_or(0));
    member
        .read_to_end(&mut buf)
        .map_err(|source| ImportError::MemberRead {
            name: name.to_string(),
            source,
        })?;
    Ok(buf)
}
