// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Path fingerprint helper.

use md5::{Digest, Md5};

/// Compute the MD5 fingerprint of a path string and return its lowercase hex digest.
///
/// Only the UTF-8 bytes of the path itself are hashed, never the file content,
/// so two spellings of the same file get different fingerprints. The digest is
/// a naming tag, not a security primitive.
///
/// # Examples
///
/// ```rust,ignore
/// let tag = altermeeya::utils::fingerprint("C:\\books\\漫画.cbz");
/// assert_eq!(tag.len(), 32);
/// ```
pub fn fingerprint(path: &str) -> String {
    hex::encode(Md5::digest(path.as_bytes()))
}
