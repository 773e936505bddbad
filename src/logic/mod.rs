// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic for aliasing paths the viewer cannot open directly.

pub mod aliaser;

pub use aliaser::PathAliaser;
