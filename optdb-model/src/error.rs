// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Error types for building model instances.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while reading definitions, data files or solver results.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model definition: {0}")]
    Definition(#[from] toml::de::Error),

    #[error("Data file syntax error on line {line}: {reason}")]
    DatSyntax { line: usize, reason: String },

    #[error("component '{0}' is declared more than once")]
    DuplicateComponent(String),

    #[error("unknown {kind} '{name}'")]
    UnknownComponent { kind: &'static str, name: String },

    #[error("'{component}' is indexed by unknown set '{set}'")]
    UnknownIndexSet { component: String, set: String },

    #[error("'{component}' is indexed by '{set}', which is itself an indexed set")]
    IndexedIndexSet { component: String, set: String },

    #[error("'{component}' expects {expected} index values per entry, got {found}")]
    Arity {
        component: String,
        expected: usize,
        found: usize,
    },

    #[error("index {index} is not in the domain of '{component}'")]
    OutOfDomain { component: String, index: String },

    /// Two distinct keys of one component print the same, e.g. `1` and `'1'`.
    #[error("'{component}' has two entries that both render as {index}")]
    AmbiguousIndex { component: String, index: String },

    #[error("'.' cannot stand for an index value of '{0}'")]
    MissingIndexValue(String),

    #[error("param statement names no parameters")]
    NoParams,

    #[error("parameter '{0}' has no value and no default")]
    MissingValue(String),

    #[error("Failed to parse solver results: {0}")]
    ResultsParse(#[from] serde_json::Error),

    #[error("Malformed solver results: {0}")]
    MalformedResults(String),
}

impl ModelError {
    pub(crate) fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }
}
