// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Error types for configuration handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while reading, querying or writing the config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    /// The requested section is not present in the config.
    #[error("section {0} does not exist")]
    NoSection(String),

    /// The section exists but has no such option.
    #[error("section {section} has no option {option}")]
    NoOption { section: String, option: String },

    /// A key given on the command line is not of the form `section.option`.
    #[error("expected a key of the form <section>.<option>, got '{0}'")]
    MalformedKey(String),

    /// A value is present but cannot be used.
    #[error("No legal value for {section}.{option}: {reason}")]
    Invalid {
        section: String,
        option: String,
        reason: String,
    },

    #[error("Could not determine the home directory for the global config")]
    NoHomeDir,
}

impl ConfigError {
    pub(crate) fn invalid(section: &str, option: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            section: section.to_owned(),
            option: option.to_owned(),
            reason: reason.into(),
        }
    }
}
