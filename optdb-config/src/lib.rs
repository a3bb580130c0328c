// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Layered configuration for optdb.
//!
//! The config is an INI file with one level of sections and unquoted values:
//!
//! ```ini
//! [sqlite3]
//! file = .optdb/optdb.sqlite3
//! schema = bundled
//!
//! [archive]
//! directory = .optdb/.files
//! ```
//!
//! A file in the working directory takes precedence over the one in the
//! user's home directory. Reading with neither present writes the defaults
//! to the global location. Updates always go to the local file.

mod config;
mod error;
mod paths;

pub use config::{ARCHIVE_SECTION, BUNDLED_SCHEMA, Config, SQLITE_SECTION, SchemaSource};
pub use error::{ConfigError, Result};
pub use paths::{CONFIG_DIR, CONFIG_FILE, ConfigPaths};
