// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Open one file in the viewer, through an alias when its path needs one.

use anyhow::{Context, Result};
use log::debug;

use crate::app::viewer::{self, Viewer};
use crate::config::Profile;
use crate::logic::PathAliaser;
use crate::models::SourcePath;
use crate::platform::{FsLinker, SystemDrives};
use crate::utils::system_codepage;

/// Validate `raw`, resolve the viewer and open the file with the host's collaborators.
///
/// The path is validated before the profile or any drive is touched.
pub fn open_file(raw: &str) -> Result<()> {
    let source = SourcePath::parse(raw)?;

    let mut profile = Profile::load(Profile::default_path()?)?;
    debug!("using profile {}", profile.path().display());
    let viewer = Viewer::new(viewer::resolve(&mut profile, viewer::pick_viewer)?);

    let codepage = system_codepage();
    let aliaser = PathAliaser::new(codepage.as_ref(), &SystemDrives, &FsLinker);
    open_with(&aliaser, &viewer, &source)
}

/// Launch `viewer` on `source`, or on a temporary alias of it.
///
/// Direct launches return immediately. Alias launches wait for the viewer to
/// exit and then release the alias, on error paths too.
pub fn open_with(aliaser: &PathAliaser<'_>, viewer: &Viewer, source: &SourcePath) -> Result<()> {
    if !aliaser.needs_alias(source)? {
        viewer.launch(source.as_path())?;
        return Ok(());
    }

    let alias = aliaser.build_alias(source)?;
    let mut child = viewer.launch(alias.path())?;
    let status = child.wait().context("Failed to wait for the viewer")?;
    debug!("viewer exited with {status}");
    Ok(())
}
