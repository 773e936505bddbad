// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line entry point: self-registration or opening one file in the viewer.

pub mod open;
pub mod register;
pub mod viewer;

use std::ffi::OsString;

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use clap::error::ErrorKind;

use crate::config::Profile;
use crate::utils::ConversionError;

/// Open files whose names the viewer's codepage cannot carry.
///
/// Run without arguments to add the context-menu entry.
#[derive(Debug, Parser)]
#[command(name = "altermeeya", version, about)]
pub struct Cli {
    /// Remove the context-menu entry.
    #[arg(long, conflicts_with = "reset_viewer")]
    unregister: bool,

    /// Forget the configured viewer so it is asked for again on the next open.
    #[arg(long)]
    reset_viewer: bool,

    /// Absolute path of the file to open.
    #[arg(value_name = "PATH")]
    paths: Vec<OsString>,
}

/// What a single invocation does.
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Register,
    Unregister,
    ResetViewer,
    Open(String),
}

impl Cli {
    /// Resolve the invocation mode, enforcing the one-path rule.
    pub fn mode(self) -> Result<Mode> {
        if self.unregister {
            return Ok(Mode::Unregister);
        }
        if self.reset_viewer {
            return Ok(Mode::ResetViewer);
        }

        let mut paths = self.paths;
        match paths.len() {
            0 => Ok(Mode::Register),
            1 => {
                let raw = paths
                    .pop()
                    .unwrap_or_default()
                    .into_string()
                    .map_err(|_| ConversionError::NoUnicodeTranslation)?;
                Ok(Mode::Open(raw))
            }
            _ => bail!("Require exactly one argument"),
        }
    }
}

/// Parse the command line.
///
/// `--help` and `--version` print and exit as usual. Usage errors come back
/// as a one-line error so they share the failure path of every other error.
pub fn parse_args<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            let rendered = err.to_string();
            let line = rendered.lines().next().unwrap_or_default();
            anyhow!("{}", line.trim_start_matches("error: "))
        }
    })
}

/// Run one invocation and return the process exit code.
///
/// Registration reports through a dialog and returns the registry status;
/// every other failure is returned as an error for `main` to print.
pub fn run(cli: Cli) -> Result<i32> {
    match cli.mode()? {
        Mode::Register => Ok(register::install()),
        Mode::Unregister => Ok(register::uninstall()),
        Mode::ResetViewer => {
            let mut profile = Profile::load(Profile::default_path()?)?;
            viewer::reset(&mut profile)?;
            Ok(0)
        }
        Mode::Open(raw) => {
            open::open_file(&raw)?;
            Ok(0)
        }
    }
}
