// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Self-registration as an "open with" entry in the shell context menu of every file.

use std::env;
use std::io;
use std::path::Path;

use log::{error, info};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Label of the context-menu entry.
pub const CONTEXT_MENU_LABEL: &str = "AlterMeeya";

/// `ERROR_ACCESS_DENIED`, usually a missing elevation.
const ACCESS_DENIED: i32 = 5;

/// Registry path (under `HKEY_CLASSES_ROOT`) of the verb for all file types.
pub fn verb_key() -> String {
    format!("*\\shell\\{CONTEXT_MENU_LABEL}")
}

/// Registry path whose default value holds the command line.
pub fn command_key() -> String {
    format!("{}\\command", verb_key())
}

/// Command line the shell runs for the selected file.
pub fn open_command(exe: &Path) -> String {
    format!("\"{}\" \"%1\"", exe.display())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Install,
    Uninstall,
}

impl Action {
    fn success_message(self) -> &'static str {
        match self {
            Action::Install => "Successfully written to registry",
            Action::Uninstall => "Successfully removed from registry",
        }
    }
}

/// Register this executable and report the outcome in a dialog.
///
/// Returns the registry status code: `0` on success.
pub fn install() -> i32 {
    let result = env::current_exe().and_then(|exe| write_command(&open_command(&exe)));
    report(Action::Install, result)
}

/// Remove the context-menu entry and report the outcome in a dialog.
pub fn uninstall() -> i32 {
    report(Action::Uninstall, delete_verb())
}

/// Dialog text for a failed registry operation.
pub fn failure_message(err: &io::Error) -> String {
    let mut message = format!("{err}\nError occurred when writing to registry.");
    if err.raw_os_error() == Some(ACCESS_DENIED) {
        message.push_str("\nHave you tried running as administrator?");
    }
    message
}

/// Exit code mirroring the registry status of `err`.
pub fn status_code(err: &io::Error) -> i32 {
    match err.raw_os_error() {
        Some(code) if code != 0 => code,
        _ => 1,
    }
}

fn report(action: Action, result: io::Result<()>) -> i32 {
    match result {
        Ok(()) => {
            info!("{}", action.success_message());
            show_dialog(MessageLevel::Info, "Success", action.success_message());
            0
        }
        Err(err) => {
            error!("registry update failed: {err}");
            show_dialog(MessageLevel::Error, "Error", &failure_message(&err));
            status_code(&err)
        }
    }
}

fn show_dialog(level: MessageLevel, title: &str, text: &str) {
    let _ = MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(text)
        .set_buttons(MessageButtons::Ok)
        .show();
}

#[cfg(windows)]
fn write_command(command: &str) -> io::Result<()> {
    crate::platform::windows::write_classes_default_value(&command_key(), command)
}

#[cfg(windows)]
fn delete_verb() -> io::Result<()> {
    crate::platform::windows::delete_classes_tree(&verb_key())
}

#[cfg(not(windows))]
fn write_command(_command: &str) -> io::Result<()> {
    Err(unsupported())
}

#[cfg(not(windows))]
fn delete_verb() -> io::Result<()> {
    Err(unsupported())
}

#[cfg(not(windows))]
fn unsupported() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "the shell context menu only exists on Windows",
    )
}
