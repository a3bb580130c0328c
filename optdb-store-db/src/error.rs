// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Error types for store operations.

use std::path::PathBuf;

use optdb_model::ModelError;
use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while initializing, serializing into or reading the store.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database file not found
    #[error("Database not found at: {0}")]
    DatabaseNotFound(PathBuf),

    /// `init` found an existing database file
    #[error(
        "{0} already exists, make sure to provide another file name, change directory or remove the existing database"
    )]
    DatabaseExists(PathBuf),

    /// `init` found an existing archive directory
    #[error("Archive directory {0} already exists")]
    ArchiveExists(PathBuf),

    /// Files can only be archived into a directory created by `init`
    #[error("Archive directory {0} does not exist, run `optdb init` first")]
    ArchiveMissing(PathBuf),

    /// Filesystem error with the path it happened on
    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Model, data or solver results could not be read
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The schema only holds members of plain sets
    #[error("indexed set '{0}' cannot be stored")]
    IndexedSetUnsupported(String),

    /// A `files.file_kind` value outside model, data and sol
    #[error("unknown file role '{0}', expected one of model, data, sol")]
    UnknownRole(String),

    /// Table name not in the bundled schema
    #[error("unknown table '{0}'")]
    UnknownTable(String),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
