// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Win32 bindings: volume queries, file attributes, ANSI codepage conversion and the registry.

use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::mem;
use std::os::windows::ffi::OsStrExt;
use std::os::windows::io::AsRawHandle;
use std::path::Path;
use std::ptr;

use windows_sys::Win32::Foundation::{
    ERROR_INSUFFICIENT_BUFFER, ERROR_INVALID_FLAGS, ERROR_NO_UNICODE_TRANSLATION, GetLastError,
    HANDLE,
};
use windows_sys::Win32::Globalization::{
    CP_UTF8, GetACP, MultiByteToWideChar, WideCharToMultiByte,
};
use windows_sys::Win32::Storage::FileSystem::{
    BY_HANDLE_FILE_INFORMATION, FILE_ATTRIBUTE_HIDDEN, GetFileAttributesW,
    GetFileInformationByHandle, GetVolumeInformationW, INVALID_FILE_ATTRIBUTES,
    SetFileAttributesW,
};
use winreg::RegKey;
use winreg::enums::HKEY_CLASSES_ROOT;

use crate::utils::codepage::{Codepage, ConversionError, PLACEHOLDER};

const MAX_PATH: usize = 260;

/// NUL-terminated UTF-16 copy of an OS string.
fn wide(value: &OsStr) -> Vec<u16> {
    value.encode_wide().chain(std::iter::once(0)).collect()
}

/// Ask the volume mounted at `root` for its filesystem name.
pub fn volume_filesystem_name(root: &Path) -> io::Result<String> {
    let root = wide(root.as_os_str());
    let mut name = [0u16; MAX_PATH + 1];
    // SAFETY: `root` is NUL-terminated, `name` outlives the call and its length is passed;
    // every optional out-pointer is null.
    let ok = unsafe {
        GetVolumeInformationW(
            root.as_ptr(),
            ptr::null_mut(),
            0,
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            name.as_mut_ptr(),
            name.len() as u32,
        )
    };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    let len = name.iter().position(|&c| c == 0).unwrap_or(name.len());
    Ok(String::from_utf16_lossy(&name[..len]))
}

/// OR `FILE_ATTRIBUTE_HIDDEN` into the attributes `path` already carries.
pub fn add_hidden_attribute(path: &Path) -> io::Result<()> {
    let path = wide(path.as_os_str());
    // SAFETY: `path` is a NUL-terminated wide string alive for both calls.
    let current = unsafe { GetFileAttributesW(path.as_ptr()) };
    if current == INVALID_FILE_ATTRIBUTES {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: as above.
    if unsafe { SetFileAttributesW(path.as_ptr(), current | FILE_ATTRIBUTE_HIDDEN) } == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Volume serial number and file index; equal for every hardlink of one file.
pub fn file_identity(path: &Path) -> io::Result<(u32, u64)> {
    let file = File::open(path)?;
    // SAFETY: plain-old-data struct, fully written by the call below on success.
    let mut info: BY_HANDLE_FILE_INFORMATION = unsafe { mem::zeroed() };
    // SAFETY: the handle stays open for the duration of the call.
    if unsafe { GetFileInformationByHandle(file.as_raw_handle() as HANDLE, &mut info) } == 0 {
        return Err(io::Error::last_os_error());
    }
    let index = (u64::from(info.nFileIndexHigh) << 32) | u64::from(info.nFileIndexLow);
    Ok((info.dwVolumeSerialNumber, index))
}

/// Map the thread's last error after a failed conversion call.
fn last_conversion_error() -> ConversionError {
    // SAFETY: reads thread-local state only.
    match unsafe { GetLastError() } {
        ERROR_INSUFFICIENT_BUFFER => ConversionError::InsufficientBuffer,
        ERROR_INVALID_FLAGS => ConversionError::InvalidFlags,
        ERROR_NO_UNICODE_TRANSLATION => ConversionError::NoUnicodeTranslation,
        _ => ConversionError::InvalidParameter,
    }
}

/// The active ANSI codepage (`GetACP`).
#[derive(Clone, Copy, Debug)]
pub struct AnsiCodepage {
    id: u32,
}

impl AnsiCodepage {
    pub fn active() -> Self {
        // SAFETY: no arguments, no side effects.
        Self { id: unsafe { GetACP() } }
    }
}

impl Codepage for AnsiCodepage {
    fn encode(&self, text: &str) -> Result<Vec<u8>, ConversionError> {
        let wide: Vec<u16> = text.encode_utf16().collect();
        if wide.is_empty() {
            return Ok(Vec::new());
        }
        let wide_len = i32::try_from(wide.len()).map_err(|_| ConversionError::InvalidParameter)?;

        // UTF-8 as the system codepage rejects a default character.
        let default = [PLACEHOLDER, 0];
        let default_ptr = if self.id == CP_UTF8 {
            ptr::null()
        } else {
            default.as_ptr()
        };

        // SAFETY: `wide` holds `wide_len` units; a zero-sized output only queries the length.
        let needed = unsafe {
            WideCharToMultiByte(
                self.id,
                0,
                wide.as_ptr(),
                wide_len,
                ptr::null_mut(),
                0,
                default_ptr,
                ptr::null_mut(),
            )
        };
        if needed <= 0 {
            return Err(last_conversion_error());
        }

        let mut narrow = vec![0u8; needed as usize];
        // SAFETY: `narrow` has exactly `needed` bytes of room.
        let written = unsafe {
            WideCharToMultiByte(
                self.id,
                0,
                wide.as_ptr(),
                wide_len,
                narrow.as_mut_ptr(),
                needed,
                default_ptr,
                ptr::null_mut(),
            )
        };
        if written <= 0 {
            return Err(last_conversion_error());
        }
        narrow.truncate(written as usize);
        Ok(narrow)
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, ConversionError> {
        if bytes.is_empty() {
            return Ok(String::new());
        }
        let narrow_len =
            i32::try_from(bytes.len()).map_err(|_| ConversionError::InvalidParameter)?;

        // SAFETY: `bytes` holds `narrow_len` bytes; a zero-sized output only queries the length.
        let needed = unsafe {
            MultiByteToWideChar(
                self.id,
                0,
                bytes.as_ptr(),
                narrow_len,
                ptr::null_mut(),
                0,
            )
        };
        if needed <= 0 {
            return Err(last_conversion_error());
        }

        let mut wide = vec![0u16; needed as usize];
        // SAFETY: `wide` has exactly `needed` units of room.
        let written = unsafe {
            MultiByteToWideChar(
                self.id,
                0,
                bytes.as_ptr(),
                narrow_len,
                wide.as_mut_ptr(),
                needed,
            )
        };
        if written <= 0 {
            return Err(last_conversion_error());
        }
        wide.truncate(written as usize);
        String::from_utf16(&wide).map_err(|_| ConversionError::NoUnicodeTranslation)
    }
}

/// Create `HKEY_CLASSES_ROOT\<subkey>` if needed and set its default value.
pub fn write_classes_default_value(subkey: &str, value: &str) -> io::Result<()> {
    let classes = RegKey::predef(HKEY_CLASSES_ROOT);
    let (key, _) = classes.create_subkey(subkey)?;
    key.set_value("", &value)
}

/// Delete `HKEY_CLASSES_ROOT\<subkey>` and everything below it.
pub fn delete_classes_tree(subkey: &str) -> io::Result<()> {
    RegKey::predef(HKEY_CLASSES_ROOT).delete_subkey_all(subkey)
}
