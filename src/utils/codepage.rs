// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Narrow (single/double byte) codepage conversions used by the sanitizer.

use thiserror::Error;

/// Byte written in place of characters a codepage cannot represent.
pub const PLACEHOLDER: u8 = b'?';

/// Failures reported by a codepage conversion.
///
/// The variants mirror the failure codes of the Win32 conversion routines;
/// none of them is retryable. Buffer and flag failures only come from Win32.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[cfg(windows)]
    #[error("A supplied buffer size was not large enough, or it was incorrectly set to NULL.")]
    InsufficientBuffer,
    #[cfg(windows)]
    #[error("The values supplied for flags were not valid.")]
    InvalidFlags,
    #[error("Any of the parameter values was invalid.")]
    InvalidParameter,
    #[error("Invalid Unicode was found in a string.")]
    NoUnicodeTranslation,
}

/// A narrow character encoding that wide text can be squeezed through.
pub trait Codepage {
    /// Encode `text`, writing [`PLACEHOLDER`] for every unrepresentable character.
    fn encode(&self, text: &str) -> Result<Vec<u8>, ConversionError>;

    /// Decode narrow bytes back into text.
    fn decode(&self, bytes: &[u8]) -> Result<String, ConversionError>;
}

/// 7-bit US-ASCII.
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default)]
pub struct Ascii;

#[cfg(test)]
impl Codepage for Ascii {
    fn encode(&self, text: &str) -> Result<Vec<u8>, ConversionError> {
        Ok(text
            .chars()
            .map(|ch| if ch.is_ascii() { ch as u8 } else { PLACEHOLDER })
            .collect())
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, ConversionError> {
        if !bytes.is_ascii() {
            return Err(ConversionError::NoUnicodeTranslation);
        }
        Ok(bytes.iter().map(|&b| b as char).collect())
    }
}

/// ISO-8859-1: every byte maps to the code point of the same value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latin1;

impl Codepage for Latin1 {
    fn encode(&self, text: &str) -> Result<Vec<u8>, ConversionError> {
        Ok(text
            .chars()
            .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(PLACEHOLDER))
            .collect())
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, ConversionError> {
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }
}

/// The codepage the viewer sees on this host.
///
/// On Windows this is the active ANSI codepage (`GetACP`); elsewhere Latin-1
/// stands in for it.
pub fn system_codepage() -> Box<dyn Codepage> {
    #[cfg(windows)]
    {
        Box::new(crate::platform::windows::AnsiCodepage::active())
    }
    #[cfg(not(windows))]
    {
        Box::new(Latin1)
    }
}
