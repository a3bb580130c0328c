// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Database connection management.

use std::fs;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{Error, Result};
use crate::schema::{SCHEMA_SQL, TABLES};

/// Database open mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read-only access
    ReadOnly,
    /// Read-write access to an existing database
    ReadWrite,
    /// Create new database if it doesn't exist
    Create,
}

/// Where the schema script comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema<'a> {
    /// The script shipped with this crate.
    Bundled,
    /// A user-provided SQL script.
    Script(&'a Path),
}

/// SQLite connection to an optdb store.
pub struct OptDb {
    pub(crate) conn: Connection,
}

impl OptDb {
    /// Open or create a database at a custom path.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let flags = match mode {
            OpenMode::ReadOnly => {
                if !path.exists() {
                    return Err(Error::DatabaseNotFound(path.to_owned()));
                }
                OpenFlags::SQLITE_OPEN_READ_ONLY
            }
            OpenMode::ReadWrite => {
                if !path.exists() {
                    return Err(Error::DatabaseNotFound(path.to_owned()));
                }
                OpenFlags::SQLITE_OPEN_READ_WRITE
            }
            OpenMode::Create => OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        };

        let conn = Connection::open_with_flags(path, flags).map_err(|e| Error::DatabaseOpen {
            path: path.to_owned(),
            source: e,
        })?;
        let db = Self { conn };
        if mode != OpenMode::ReadOnly {
            db.configure_pragmas()?;
        }

        debug!("Opened database at {} ({:?})", path.display(), mode);
        Ok(db)
    }

    /// Create an in-memory database with the bundled schema.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.configure_pragmas()?;
        db.create_schema(Schema::Bundled)?;
        debug!("Created in-memory database");
        Ok(db)
    }

    fn configure_pragmas(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
            "#,
        )?;
        Ok(())
    }

    /// Run a schema script against the database.
    pub fn create_schema(&self, schema: Schema<'_>) -> Result<()> {
        match schema {
            Schema::Bundled => self.conn.execute_batch(SCHEMA_SQL)?,
            Schema::Script(path) => {
                let sql = fs::read_to_string(path)
                    .map_err(|e| Error::io("read schema script", path, e))?;
                debug!("Executing schema script {}", path.display());
                self.conn.execute_batch(&sql)?;
            }
        }
        debug!("Created database schema");
        Ok(())
    }

    /// Get raw connection (for advanced usage).
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Check if every table of the bundled schema exists.
    pub fn has_schema(&self) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1")?;
        for table in TABLES {
            let count: i64 = stmt.query_row([table], |row| row.get(0))?;
            if count == 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Create a new store: the database file with its schema and the archive
/// directory.
///
/// Fails without touching the filesystem if either already exists.
pub fn initialize(db_file: &Path, archive_dir: &Path, schema: Schema<'_>) -> Result<OptDb> {
    if db_file.exists() {
        return Err(Error::DatabaseExists(db_file.to_owned()));
    }
    if archive_dir.exists() {
        return Err(Error::ArchiveExists(archive_dir.to_owned()));
    }

    if let Some(parent) = db_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            debug!("creating directory {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
        }
    }
    debug!("creating directory {}", archive_dir.display());
    fs::create_dir_all(archive_dir)
        .map_err(|e| Error::io("create directory", archive_dir, e))?;

    debug!("Creating new database file {}", db_file.display());
    let db = OptDb::open(db_file, OpenMode::Create)?;
    db.create_schema(schema)?;
    Ok(db)
}
