// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Locate, remember and launch the external viewer.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};

use crate::config::Profile;

/// Profile section holding the viewer location.
pub const SECTION: &str = "General";
/// Profile key holding the viewer executable path.
pub const VIEWER_KEY: &str = "Viewer";

/// Configured viewer path, asking through `pick` (and remembering the answer) when unset.
///
/// # Errors
///
/// Fails when nothing is configured and the picker is cancelled.
pub fn resolve(profile: &mut Profile, pick: impl FnOnce() -> Option<PathBuf>) -> Result<PathBuf> {
    let mut section = profile.section(SECTION);
    let configured = section.get_or(VIEWER_KEY, "");
    if !configured.is_empty() {
        return Ok(PathBuf::from(configured));
    }

    let picked = pick()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| anyhow!("Cannot locate viewer executable"))?;
    if let Err(err) = section.set(VIEWER_KEY, &picked.to_string_lossy()) {
        warn!("viewer location not saved: {err:#}");
    }
    Ok(picked)
}

/// Forget the configured viewer.
pub fn reset(profile: &mut Profile) -> Result<()> {
    profile
        .remove(SECTION, VIEWER_KEY)
        .context("Failed to reset viewer location")?;
    Ok(())
}

/// Ask the user for the viewer executable.
pub fn pick_viewer() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Locate viewer")
        .add_filter("Executable Files", &["exe"])
        .pick_file()
}

/// External application that receives the path to open as its only argument.
#[derive(Clone, Debug)]
pub struct Viewer {
    exe: PathBuf,
}

impl Viewer {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    /// `<viewer> "<target>"`, with no extra handles or environment.
    pub fn command(&self, target: &Path) -> Command {
        let mut command = Command::new(&self.exe);
        command.arg(target);
        command
    }

    /// Spawn the viewer on `target` without waiting for it.
    pub fn launch(&self, target: &Path) -> Result<Child> {
        debug!("launching {} {}", self.exe.display(), target.display());
        self.command(target)
            .spawn()
            .with_context(|| format!("Failed to create process {}", self.exe.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::path::{Path, PathBuf};

    use super::{SECTION, VIEWER_KEY, Viewer, reset, resolve};
    use crate::config::Profile;

    // A configured viewer is used without showing the picker.
    #[test]
    fn resolve_prefers_configured_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let mut profile = Profile::load(dir.path().join("p.json")).unwrap();
        profile.set(SECTION, VIEWER_KEY, "C:\\Tools\\viewer.exe").unwrap();

        let asked = Cell::new(false);
        let viewer = resolve(&mut profile, || {
            asked.set(true);
            None
        })
        .unwrap();
        assert_eq!(viewer, PathBuf::from("C:\\Tools\\viewer.exe"));
        assert!(!asked.get());
    }

    // The picked path is stored so the next run skips the picker.
    #[test]
    fn resolve_remembers_picked_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        let mut profile = Profile::load(&path).unwrap();

        let viewer = resolve(&mut profile, || Some(PathBuf::from("D:\\viewer.exe"))).unwrap();
        assert_eq!(viewer, PathBuf::from("D:\\viewer.exe"));

        let reloaded = Profile::load(&path).unwrap();
        assert_eq!(reloaded.get(SECTION, VIEWER_KEY), Some("D:\\viewer.exe"));
    }

    #[test]
    fn resolve_fails_when_picker_is_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let mut profile = Profile::load(dir.path().join("p.json")).unwrap();
        profile.set(SECTION, VIEWER_KEY, "").unwrap();

        let err = resolve(&mut profile, || None).unwrap_err();
        assert_eq!(err.to_string(), "Cannot locate viewer executable");
    }

    #[test]
    fn reset_clears_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let mut profile = Profile::load(dir.path().join("p.json")).unwrap();
        profile.set(SECTION, VIEWER_KEY, "viewer.exe").unwrap();

        reset(&mut profile).unwrap();
        assert_eq!(profile.get(SECTION, VIEWER_KEY), None);
    }

    #[test]
    fn command_passes_target_as_single_argument() {
        let viewer = Viewer::new("C:\\Tools\\viewer.exe");
        let command = viewer.command(Path::new("C:\\books\\a b.cbz"));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec![std::ffi::OsStr::new("C:\\books\\a b.cbz")]);
    }

    #[test]
    fn launch_reports_missing_executable() {
        let viewer = Viewer::new("/definitely/not/a/viewer.exe");
        let err = viewer.launch(Path::new("a.cbz")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to create process"));
    }
}
