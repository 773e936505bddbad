// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Test doubles for the platform seams.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{Drives, Linker};
use crate::logic::aliaser::MOUNT_FOLDER;
use crate::utils::file_name_component;

/// Every drive letter maps onto one temporary directory.
pub struct FakeDrive {
    pub root: TempDir,
    pub filesystem: Result<String, io::ErrorKind>,
    pub hidden: RefCell<Vec<PathBuf>>,
}

impl FakeDrive {
    pub fn new(filesystem: &str) -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
            filesystem: Ok(filesystem.to_string()),
            hidden: RefCell::new(Vec::new()),
        }
    }

    pub fn mount_folder(&self) -> PathBuf {
        self.root.path().join(MOUNT_FOLDER)
    }
}

impl Drives for FakeDrive {
    fn root(&self, _drive: char) -> PathBuf {
        self.root.path().to_path_buf()
    }

    fn filesystem_name(&self, _drive: char) -> io::Result<String> {
        self.filesystem.clone().map_err(io::Error::from)
    }

    fn mark_hidden(&self, dir: &Path) -> io::Result<()> {
        self.hidden.borrow_mut().push(dir.to_path_buf());
        Ok(())
    }
}

/// Resolves `X:\...` sources by file name inside a fixture directory, then links for real.
pub struct FixtureLinker {
    pub files: TempDir,
    pub links: Cell<usize>,
}

impl FixtureLinker {
    pub fn with_file(name: &str, content: &[u8]) -> Self {
        let files = tempfile::tempdir().unwrap();
        fs::write(files.path().join(name), content).unwrap();
        Self {
            files,
            links: Cell::new(0),
        }
    }

    pub fn fixture(&self, name: &str) -> PathBuf {
        self.files.path().join(name)
    }
}

impl Linker for FixtureLinker {
    fn link(&self, original: &Path, alias: &Path) -> io::Result<()> {
        self.links.set(self.links.get() + 1);
        let name = file_name_component(original.to_str().unwrap_or_default());
        fs::hard_link(self.fixture(name), alias)
    }

    fn unlink(&self, alias: &Path) -> io::Result<()> {
        fs::remove_file(alias)
    }

    fn same_file(&self, original: &Path, alias: &Path) -> io::Result<bool> {
        let name = file_name_component(original.to_str().unwrap_or_default());
        super::same_file(&self.fixture(name), alias)
    }
}
