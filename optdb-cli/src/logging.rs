// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Diagnostic log file setup.

use std::fs::OpenOptions;
use std::path::Path;

use crate::error::{CliError, IoContext};

/// Log file written in the working directory on every run.
pub const LOG_FILE: &str = "optdb.log";

/// Send every log record to `path`, appending to earlier runs.
///
/// The level defaults to `debug` and follows `RUST_LOG` when set.
pub fn init(path: &Path) -> Result<(), CliError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .io_context(|| format!("Failed to open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
