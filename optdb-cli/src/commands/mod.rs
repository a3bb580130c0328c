// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Subcommand implementations.

mod config;
mod init;
mod insert;

use std::io::{self, Write};
use std::path::Path;

use optdb_config::ConfigPaths;

use crate::cli::Commands;
use crate::error::CliError;

/// Dump of the statements executed by the last `insert`.
pub const INSERT_DUMP: &str = "optdb-insert.sql";

pub fn run(command: Commands, paths: &ConfigPaths) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Config(args) => config::run(&args, paths, &mut out),
        Commands::Init => init::run(paths, &mut out),
        Commands::Insert(args) => insert::run(&args, paths, Path::new(INSERT_DUMP), &mut out),
    }?;
    out.flush()
        .map_err(|e| CliError::io("Failed to write to stdout", e))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::PathBuf;

    use optdb_config::{Config, ConfigPaths};
    use tempfile::TempDir;

    /// Config files inside a scratch directory, pointing the store there too.
    pub struct Workspace {
        pub dir: TempDir,
        pub paths: ConfigPaths,
    }

    impl Workspace {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let paths = ConfigPaths::new(dir.path().join("local"), dir.path().join("global"));
            let mut config = Config::load(&paths).unwrap();
            for (key, value) in [
                ("sqlite3.file", dir.path().join("store/optdb.sqlite3")),
                ("archive.directory", dir.path().join("store/.files")),
            ] {
                config.set(key, &value.to_string_lossy()).unwrap();
            }
            config.persist(&paths.local).unwrap();
            Self { dir, paths }
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        pub fn write(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.path(name);
            std::fs::write(&path, contents).unwrap();
            path
        }

        pub fn db_file(&self) -> PathBuf {
            self.path("store/optdb.sqlite3")
        }
    }
}
