// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Strip characters a narrow codepage cannot carry, and split file names off paths.

use super::codepage::{Codepage, ConversionError, PLACEHOLDER};

/// Remove every character of `text` that `codepage` cannot represent.
///
/// # Steps
/// - Encode to the narrow codepage; unmappable characters become `?`.
/// - Drop the placeholders outright instead of keeping a visible substitute.
/// - Decode the remaining bytes back to wide text.
///
/// Text made only of unsupported characters comes back empty. A literal `?`
/// is dropped as well, which is harmless for paths since Windows forbids it
/// in file names.
///
/// # Errors
///
/// Text with an embedded NUL cannot cross a C string boundary and is an
/// invalid parameter. Otherwise the codepage's [`ConversionError`] is returned
/// unchanged; callers treat it as fatal.
///
/// # Examples
///
/// ```rust,ignore
/// let safe = sanitize("C:\\books\\漫画.cbz", &Ascii)?;
/// assert_eq!(safe, "C:\\books\\.cbz");
/// ```
pub fn sanitize(text: &str, codepage: &dyn Codepage) -> Result<String, ConversionError> {
    if text.contains('\0') {
        return Err(ConversionError::InvalidParameter);
    }
    let mut narrow = codepage.encode(text)?;
    narrow.retain(|&b| b != PLACEHOLDER);
    codepage.decode(&narrow)
}

/// Last component of a Windows or POSIX style path, or `""` when there is no separator.
pub fn file_name_component(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => "",
    }
}
