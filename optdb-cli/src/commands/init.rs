// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

use std::io::Write;

use log::info;
use optdb_config::{Config, ConfigPaths, SchemaSource};
use optdb_store_db::{Schema, initialize};

use crate::error::{CliError, IoContext};

/// Create the database and archive directory named by the config.
pub fn run(paths: &ConfigPaths, out: &mut dyn Write) -> Result<(), CliError> {
    let config = Config::load(paths)?;
    let db_file = config.database_file()?;
    let archive_dir = config.archive_dir()?;
    let schema_source = config.schema()?;
    let schema = match &schema_source {
        SchemaSource::Bundled => Schema::Bundled,
        SchemaSource::Script(path) => Schema::Script(path),
    };

    initialize(&db_file, &archive_dir, schema)?;
    info!(
        "initialized {} with archive {}",
        db_file.display(),
        archive_dir.display()
    );
    writeln!(out, "Created database {}", db_file.display())
        .io_context(|| "Failed to write to stdout".to_owned())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use optdb_store_db::{Error, OpenMode, OptDb};

    use super::*;
    use crate::commands::testing::Workspace;

    #[test]
    fn test_init_creates_store() {
        let ws = Workspace::new();
        run(&ws.paths, &mut Vec::new()).unwrap();
        let db = OptDb::open(ws.db_file(), OpenMode::ReadOnly).unwrap();
        assert!(db.has_schema().unwrap());
        assert!(ws.path("store/.files").is_dir());
    }

    #[test]
    fn test_init_twice_fails() {
        let ws = Workspace::new();
        run(&ws.paths, &mut Vec::new()).unwrap();
        let err = run(&ws.paths, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Store(Error::DatabaseExists(_))));
    }
}
