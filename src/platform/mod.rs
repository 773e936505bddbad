// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! OS seams used by the aliasing logic: drive lookup and hardlink management.
//!
//! The traits keep the business logic testable with fakes; the `System*`
//! implementations talk to the real filesystem.

#[cfg(test)]
pub mod fakes;
#[cfg(windows)]
pub mod windows;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Per-drive volume queries.
pub trait Drives {
    /// Root directory of `drive` (for example `D:\`).
    fn root(&self, drive: char) -> PathBuf;

    /// Filesystem name the volume reports (for example `NTFS`).
    fn filesystem_name(&self, drive: char) -> io::Result<String>;

    /// Add the hidden attribute to `dir`, keeping whatever attributes it already has.
    fn mark_hidden(&self, dir: &Path) -> io::Result<()>;
}

/// Creates and removes hardlinks.
pub trait Linker {
    /// Create `alias` as a second directory entry for `original`.
    fn link(&self, original: &Path, alias: &Path) -> io::Result<()>;

    /// Remove the `alias` entry. The data stays reachable through the original.
    fn unlink(&self, alias: &Path) -> io::Result<()>;

    /// `true` when both entries name the same file on disk.
    fn same_file(&self, a: &Path, b: &Path) -> io::Result<bool> {
        same_file(a, b)
    }
}

/// Compare the on-disk identity (volume and file index) of two entries.
#[cfg(unix)]
pub fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let (a, b) = (fs::metadata(a)?, fs::metadata(b)?);
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(windows)]
pub fn same_file(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(windows::file_identity(a)? == windows::file_identity(b)?)
}

#[cfg(not(any(unix, windows)))]
pub fn same_file(_a: &Path, _b: &Path) -> io::Result<bool> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "file identity is not available on this platform",
    ))
}

/// Volumes of the running host.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemDrives;

impl Drives for SystemDrives {
    fn root(&self, drive: char) -> PathBuf {
        PathBuf::from(format!("{drive}:\\"))
    }

    #[cfg(windows)]
    fn filesystem_name(&self, drive: char) -> io::Result<String> {
        windows::volume_filesystem_name(&self.root(drive))
    }

    #[cfg(not(windows))]
    fn filesystem_name(&self, drive: char) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("drive {drive}: volumes only exist on Windows"),
        ))
    }

    #[cfg(windows)]
    fn mark_hidden(&self, dir: &Path) -> io::Result<()> {
        windows::add_hidden_attribute(dir)
    }

    // Dot-prefixed folders are already hidden outside Windows.
    #[cfg(not(windows))]
    fn mark_hidden(&self, _dir: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Hardlinks through `std::fs` (`CreateHardLinkW` on Windows).
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLinker;

impl Linker for FsLinker {
    fn link(&self, original: &Path, alias: &Path) -> io::Result<()> {
        fs::hard_link(original, alias)
    }

    fn unlink(&self, alias: &Path) -> io::Result<()> {
        fs::remove_file(alias)
    }
}
