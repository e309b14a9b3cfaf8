// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Import of captured HTTP traffic archives.
//!
//! An archive holds one JSON document per captured transaction. This library
//! enumerates those members in capture order, decodes their loosely typed
//! JSON and rebuilds each transaction as a byte-exact HTTP/1.1 request and
//! response pair ([`ParsedEntry`]).

pub mod archive;
pub mod capture;
pub mod config;
pub mod entry;
pub mod error;
pub mod helpers;
pub mod message;
pub mod model;
pub mod parser;
pub mod scalar;
pub mod serde_helpers;

#[cfg(test)]
mod test_helpers;

pub use entry::{filter_entries, ParsedEntry};
pub use error::ImportError;
pub use parser::{parse_archive, parse_archive_until, parse_archive_with, ImportOptions, ImportReport};
