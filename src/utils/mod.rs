// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by the aliasing logic and the app shell.

pub mod codepage;
pub mod hash;
pub mod sanitize;

/// Narrow codepage abstraction and the host's active codepage.
pub use codepage::{Codepage, ConversionError, system_codepage};
/// Compute the MD5 fingerprint of a path string.
pub use hash::fingerprint;
/// Strip characters the active codepage cannot represent.
pub use sanitize::{file_name_component, sanitize};
