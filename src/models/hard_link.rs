// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Scoped hardlink alias that removes itself when dropped.

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::platform::Linker;

/// Owns an alias directory entry and unlinks it on drop.
///
/// The original file is never touched: dropping the guard removes only the
/// alias entry, and the shared data stays reachable through the source path.
pub struct HardLink<'a> {
    alias: PathBuf,
    linker: &'a dyn Linker,
}

impl<'a> HardLink<'a> {
    /// Link `alias` to `original`.
    ///
    /// An existing alias that already names the same file (another run has the
    /// same file open) is reused. One that names different data is stale and
    /// gets replaced.
    ///
    /// # Errors
    ///
    /// Returns the linker's error when the link cannot be created, or when a
    /// stale alias is in the way and cannot be removed.
    pub fn create(linker: &'a dyn Linker, original: &Path, alias: PathBuf) -> io::Result<Self> {
        match linker.link(original, &alias) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                if linker.same_file(original, &alias).unwrap_or(false) {
                    debug!("reusing alias {}", alias.display());
                } else {
                    debug!("replacing stale alias {}", alias.display());
                    linker.unlink(&alias)?;
                    linker.link(original, &alias)?;
                }
            }
            Err(err) => return Err(err),
        }
        info!("created alias {}", alias.display());
        Ok(Self { alias, linker })
    }

    pub fn path(&self) -> &Path {
        &self.alias
    }
}

impl Drop for HardLink<'_> {
    fn drop(&mut self) {
        match self.linker.unlink(&self.alias) {
            Ok(()) => info!("released alias {}", self.alias.display()),
            Err(err) => warn!("failed to remove alias {}: {}", self.alias.display(), err),
        }
    }
}
