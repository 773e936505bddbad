// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Validated, drive-rooted path of the file to open.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::utils::file_name_component;

/// Reasons a command-line path is rejected before anything touches the disk.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Path too short")]
    TooShort,
    #[error("Require absolute path")]
    NotAbsolute,
}

/// Absolute `X:\...` path, at least three characters long.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePath(String);

impl SourcePath {
    /// Validate `raw` as a drive-letter-rooted path.
    ///
    /// Only the length and the `:` after the drive letter are checked; the
    /// file itself is not required to exist yet.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.chars().count() < 3 {
            return Err(PathError::TooShort);
        }
        if raw.chars().nth(1) != Some(':') {
            return Err(PathError::NotAbsolute);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Drive letter, exactly as typed.
    pub fn drive(&self) -> char {
        // Validated non-empty in `parse`.
        self.0.chars().next().unwrap_or_default()
    }

    /// Final component after the last separator.
    pub fn file_name(&self) -> &str {
        file_name_component(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
