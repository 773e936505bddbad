// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Decide whether a path needs an alias and materialize it as a hardlink.
//!
//! Responsibilities:
//! - Compare a path against its codepage-sanitized form.
//! - Check that the drive's filesystem can hold hardlinks.
//! - Name aliases `<fingerprint>_<sanitized file name>` inside a hidden per-drive mount folder.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};
use thiserror::Error;

use crate::models::{HardLink, SourcePath};
use crate::platform::{Drives, Linker};
use crate::utils::{Codepage, ConversionError, fingerprint, sanitize};

/// Folder under each drive root that holds the aliases for that drive.
pub const MOUNT_FOLDER: &str = ".altermeeya";

/// Filesystem name trusted to support hardlinks.
///
/// The volume's hardlink capability flag proved unreliable, so the name is checked instead.
pub const HARDLINK_FILESYSTEM: &str = "NTFS";

/// Used when nothing of the file name survives sanitization.
const EMPTY_NAME_FALLBACK: &str = "file";

/// Failures while deciding on or building an alias. All of them are fatal to the caller.
#[derive(Debug, Error)]
pub enum AliasError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Cannot query volume information for drive {drive}:\\")]
    Volume {
        drive: char,
        #[source]
        source: io::Error,
    },

    #[error("Hard link not supported on drive {drive}:\\ (filesystem {filesystem:?})")]
    HardLinkUnsupported { drive: char, filesystem: String },

    #[error("Cannot create mount folder {}", .path.display())]
    MountFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot create hard link {}", .alias.display())]
    Link {
        alias: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Aliasing logic with its OS collaborators injected.
pub struct PathAliaser<'a> {
    codepage: &'a dyn Codepage,
    drives: &'a dyn Drives,
    linker: &'a dyn Linker,
}

impl<'a> PathAliaser<'a> {
    pub fn new(codepage: &'a dyn Codepage, drives: &'a dyn Drives, linker: &'a dyn Linker) -> Self {
        Self {
            codepage,
            drives,
            linker,
        }
    }

    /// Strip characters the configured codepage cannot represent.
    pub fn sanitize(&self, text: &str) -> Result<String, AliasError> {
        Ok(sanitize(text, self.codepage)?)
    }

    /// `true` when the viewer cannot be handed `source` verbatim.
    pub fn needs_alias(&self, source: &SourcePath) -> Result<bool, AliasError> {
        let safe = self.sanitize(source.as_str())?;
        let needed = safe != source.as_str();
        debug!("alias needed for {source}: {needed}");
        Ok(needed)
    }

    /// File name of the alias: `<fingerprint>_<sanitized file name>`.
    pub fn alias_name(&self, source: &SourcePath) -> Result<String, AliasError> {
        let tag = fingerprint(source.as_str());
        let name = self.sanitize(source.file_name())?;
        let name = if name.is_empty() {
            EMPTY_NAME_FALLBACK
        } else {
            name.as_str()
        };
        Ok(format!("{tag}_{name}"))
    }

    /// Create the hardlinked alias of `source` and return the guard that owns it.
    ///
    /// # Steps
    /// - Refuse drives whose filesystem is not [`HARDLINK_FILESYSTEM`].
    /// - Create the hidden [`MOUNT_FOLDER`] on the drive if missing.
    /// - Link `<mount folder>\<alias name>` to the source file.
    ///
    /// Nothing is written to the drive when the filesystem check fails.
    ///
    /// # Errors
    ///
    /// See [`AliasError`]; a failed link is an error rather than a silent
    /// fallback, so the viewer is never launched on a missing alias.
    pub fn build_alias(&self, source: &SourcePath) -> Result<HardLink<'a>, AliasError> {
        let drive = source.drive();
        self.ensure_hardlink_support(drive)?;
        let folder = self.ensure_mount_folder(drive)?;
        let alias = folder.join(self.alias_name(source)?);
        debug!("linking {} -> {}", alias.display(), source);

        HardLink::create(self.linker, source.as_path(), alias.clone())
            .map_err(|err| AliasError::Link { alias, source: err })
    }

    fn ensure_hardlink_support(&self, drive: char) -> Result<(), AliasError> {
        let filesystem = self
            .drives
            .filesystem_name(drive)
            .map_err(|source| AliasError::Volume { drive, source })?;
        if filesystem != HARDLINK_FILESYSTEM {
            return Err(AliasError::HardLinkUnsupported { drive, filesystem });
        }
        Ok(())
    }

    fn ensure_mount_folder(&self, drive: char) -> Result<PathBuf, AliasError> {
        let folder = self.drives.root(drive).join(MOUNT_FOLDER);
        fs::create_dir_all(&folder).map_err(|source| AliasError::MountFolder {
            path: folder.clone(),
            source,
        })?;
        if let Err(err) = self.drives.mark_hidden(&folder) {
            warn!("failed to hide mount folder {}: {}", folder.display(), err);
        }
        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use super::{AliasError, PathAliaser};
    use crate::models::SourcePath;
    use crate::platform::fakes::{FakeDrive, FixtureLinker};
    use crate::utils::codepage::{Ascii, Latin1};
    use crate::utils::fingerprint;

    // Paths the codepage already carries are opened directly.
    #[test]
    fn needs_alias_is_false_for_representable_paths() {
        let drive = FakeDrive::new("NTFS");
        let linker = FixtureLinker::with_file("a.cbz", b"");
        let aliaser = PathAliaser::new(&Ascii, &drive, &linker);

        let source = SourcePath::parse("C:\\books\\a.cbz").unwrap();
        assert!(!aliaser.needs_alias(&source).unwrap());
    }

    #[test]
    fn needs_alias_is_true_when_characters_would_be_lost() {
        let drive = FakeDrive::new("NTFS");
        let linker = FixtureLinker::with_file("漫画.cbz", b"");
        let aliaser = PathAliaser::new(&Latin1, &drive, &linker);

        let source = SourcePath::parse("C:\\books\\漫画.cbz").unwrap();
        assert!(aliaser.needs_alias(&source).unwrap());
    }

    // Alias lives in the hidden mount folder and shares data with the source until released.
    #[test]
    fn build_alias_links_into_hidden_mount_folder() {
        let drive = FakeDrive::new("NTFS");
        let linker = FixtureLinker::with_file("fïle.txt", b"chapter one");
        let aliaser = PathAliaser::new(&Ascii, &drive, &linker);
        let source = SourcePath::parse("D:\\docs\\fïle.txt").unwrap();

        let expected = drive
            .mount_folder()
            .join(format!("{}_fle.txt", fingerprint("D:\\docs\\fïle.txt")));
        {
            let alias = aliaser.build_alias(&source).unwrap();
            assert_eq!(alias.path(), expected);
            assert_eq!(fs::read(alias.path()).unwrap(), b"chapter one");
            assert_eq!(drive.hidden.borrow().as_slice(), &[drive.mount_folder()]);
        }

        assert!(!expected.exists());
        assert_eq!(fs::read(linker.fixture("fïle.txt")).unwrap(), b"chapter one");
        assert!(drive.mount_folder().is_dir());
    }

    // CJK names collapse to just the extension behind the fingerprint.
    #[test]
    fn build_alias_keeps_extension_of_cjk_names() {
        let drive = FakeDrive::new("NTFS");
        let linker = FixtureLinker::with_file("漫画.cbz", b"pages");
        let aliaser = PathAliaser::new(&Latin1, &drive, &linker);
        let source = SourcePath::parse("C:\\books\\漫画.cbz").unwrap();

        let alias = aliaser.build_alias(&source).unwrap();
        let name = alias.path().file_name().unwrap().to_str().unwrap().to_owned();
        assert_eq!(name, format!("{}_.cbz", fingerprint("C:\\books\\漫画.cbz")));
    }

    #[test]
    fn alias_name_falls_back_when_nothing_survives() {
        let drive = FakeDrive::new("NTFS");
        let linker = FixtureLinker::with_file("漫画", b"");
        let aliaser = PathAliaser::new(&Ascii, &drive, &linker);
        let source = SourcePath::parse("C:\\books\\漫画").unwrap();

        let name = aliaser.alias_name(&source).unwrap();
        assert_eq!(name, format!("{}_file", fingerprint("C:\\books\\漫画")));
    }

    // A FAT volume is rejected before the mount folder is created or anything is linked.
    #[test]
    fn build_alias_rejects_non_ntfs_without_touching_the_drive() {
        let drive = FakeDrive::new("FAT32");
        let linker = FixtureLinker::with_file("漫画.cbz", b"");
        let aliaser = PathAliaser::new(&Ascii, &drive, &linker);
        let source = SourcePath::parse("E:\\漫画.cbz").unwrap();

        let err = aliaser.build_alias(&source).err().unwrap();
        assert!(matches!(err, AliasError::HardLinkUnsupported { drive: 'E', .. }));
        assert!(err.to_string().starts_with("Hard link not supported on drive E:\\"));
        assert!(!drive.mount_folder().exists());
        assert_eq!(linker.links.get(), 0);
    }

    #[test]
    fn build_alias_reports_volume_query_failures() {
        let mut drive = FakeDrive::new("NTFS");
        drive.filesystem = Err(io::ErrorKind::NotFound);
        let linker = FixtureLinker::with_file("a.cbz", b"");
        let aliaser = PathAliaser::new(&Ascii, &drive, &linker);
        let source = SourcePath::parse("Q:\\漫画.cbz").unwrap();

        let err = aliaser.build_alias(&source).err().unwrap();
        assert!(matches!(err, AliasError::Volume { drive: 'Q', .. }));
    }

    // Missing source files surface as a link error instead of a dangling alias path.
    #[test]
    fn build_alias_fails_when_link_cannot_be_created() {
        let drive = FakeDrive::new("NTFS");
        let linker = FixtureLinker::with_file("other.cbz", b"");
        let aliaser = PathAliaser::new(&Ascii, &drive, &linker);
        let source = SourcePath::parse("C:\\books\\漫画.cbz").unwrap();

        let err = aliaser.build_alias(&source).err().unwrap();
        assert!(matches!(err, AliasError::Link { .. }));
        assert_eq!(fs::read_dir(drive.mount_folder()).unwrap().count(), 0);
    }

    // An existing mount folder is reused and re-hidden.
    #[test]
    fn mount_folder_creation_is_idempotent() {
        let drive = FakeDrive::new("NTFS");
        fs::create_dir(drive.mount_folder()).unwrap();
        let linker = FixtureLinker::with_file("漫画.cbz", b"x");
        let aliaser = PathAliaser::new(&Ascii, &drive, &linker);
        let source = SourcePath::parse("C:\\books\\漫画.cbz").unwrap();

        let first = aliaser.build_alias(&source).unwrap();
        drop(first);
        let _second = aliaser.build_alias(&source).unwrap();
        assert_eq!(drive.hidden.borrow().len(), 2);
    }
}
