// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Flat section/key/value profile persisted as JSON next to the executable.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Profile file name, resolved relative to the executable's directory.
pub const PROFILE_FILE_NAME: &str = "altermeeya.json";

/// Environment variable that points at an alternative profile file.
pub const PROFILE_ENV: &str = "ALTERMEEYA_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot locate the running executable")]
    CurrentExe(#[source] io::Error),
    #[error("Cannot read profile {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot parse profile {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot write profile {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// On-disk shape: `{ "<section>": { "<key>": "<value>" } }`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(transparent)]
struct Sections(BTreeMap<String, BTreeMap<String, String>>);

/// Key/value profile grouped by section; every `set` is written through to disk.
#[derive(Debug)]
pub struct Profile {
    path: PathBuf,
    sections: Sections,
}

impl Profile {
    /// Where the profile lives: `$ALTERMEEYA_CONFIG`, or next to the executable.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = env::var_os(PROFILE_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let exe = env::current_exe().map_err(ConfigError::CurrentExe)?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(dir.join(PROFILE_FILE_NAME))
    }

    /// Load the profile at `path`; a missing file yields an empty profile.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let sections = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => Sections::default(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Sections::default(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Ok(Self { path, sections })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .0
            .get(section)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, section: &str, key: &str, default: &'a str) -> &'a str {
        self.get(section, key).unwrap_or(default)
    }

    /// Store `value` and persist the whole profile.
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<(), ConfigError> {
        self.sections
            .0
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.save()
    }

    /// Drop `key` and persist; returns whether it was present.
    pub fn remove(&mut self, section: &str, key: &str) -> Result<bool, ConfigError> {
        let Some(keys) = self.sections.0.get_mut(section) else {
            return Ok(false);
        };
        let removed = keys.remove(key).is_some();
        if keys.is_empty() {
            self.sections.0.remove(section);
        }
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Borrow one section by name.
    pub fn section<'p>(&'p mut self, name: &str) -> Section<'p> {
        Section {
            profile: self,
            name: name.to_string(),
        }
    }

    fn save(&self) -> Result<(), ConfigError> {
        let write_err = |source: io::Error| ConfigError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(&self.sections)
            .map_err(io::Error::other)
            .map_err(write_err)?;
        fs::write(&self.path, json).map_err(write_err)
    }
}

/// A [`Profile`] view scoped to a single section.
pub struct Section<'p> {
    profile: &'p mut Profile,
    name: String,
}

impl Section<'_> {
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.profile.get_or(&self.name, key, default)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.profile.set(&self.name, key, value)
    }
}
