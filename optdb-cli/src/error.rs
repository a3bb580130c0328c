// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

use std::error::Error as _;
use std::fmt;

use thiserror::Error;

#[derive(Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] optdb_config::ConfigError),

    #[error("{0}")]
    Model(#[from] optdb_model::ModelError),

    #[error("{0}")]
    Store(#[from] optdb_store_db::Error),

    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

// `main` prints the error through `Debug`; show the message chain instead of
// the variant structure.
impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")?;
        let mut source = match self {
            CliError::Io { .. } => None,
            other => other.source().and_then(|s| s.source()),
        };
        while let Some(cause) = source {
            write!(f, "\n  caused by: {cause}")?;
            source = cause.source();
        }
        Ok(())
    }
}

/// Helper trait for adding context to IO errors
pub trait IoContext<T> {
    fn io_context<F>(self, f: F) -> Result<T, CliError>
    where
        F: FnOnce() -> String;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F>(self, f: F) -> Result<T, CliError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| CliError::io(f(), e))
    }
}
