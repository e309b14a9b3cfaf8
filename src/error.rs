// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Error types for archive imports.
//!
//! Only failures that abort the whole import live here. Problems confined to
//! a single member or field are absorbed by the decoder and reported through
//! [`crate::parser::ImportReport`].

use std::path::PathBuf;
use thiserror::Error;

/// Fatal import failure.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The archive path does not reference an existing file
    #[error("archive not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The archive file exists but could not be opened
    #[error("failed to open archive {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The container itself is unreadable or corrupt
    #[error("unreadable archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A listed member could not be located inside the container
    #[error("failed to locate member {name}: {source}")]
    Member {
        name: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// A member's compressed stream could not be read
    #[error("failed to read member {name}: {source}")]
    MemberRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ImportError>;
