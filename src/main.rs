// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod app;
mod config;
mod logic;
mod models;
mod platform;
mod utils;

use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let code = match app::parse_args(env::args_os()).and_then(app::run) {
        Ok(code) => code,
        Err(err) => {
            // One line, then a failure status; nothing is retried.
            eprintln!("error: {err:#}");
            1
        }
    };
    process::exit(code);
}
