// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: validated paths and the scoped alias guard.

pub mod hard_link;
pub mod source_path;

pub use hard_link::HardLink;
pub use source_path::SourcePath;
