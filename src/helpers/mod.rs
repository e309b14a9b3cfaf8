// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Helper utilities shared by the message builders.
//!
//! Each helper handles one captured field family and never fails: malformed
//! input degrades to a documented fallback.

pub mod body;
pub mod headers;
pub mod status;
pub mod uri;
