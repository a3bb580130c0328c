// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! SQLite store for optimization models, data sets and solutions.
//!
//! A store is a database created from the bundled schema plus an archive
//! directory holding a content-addressed copy of every ingested file.
//! Serializers append parameterized statements to a [`Script`], which runs
//! in a single transaction.
//!
//! # Example
//!
//! ```ignore
//! use optdb_store_db::{Archive, InsertRequest, OpenMode, OptDb, RunTokens, insert_script};
//!
//! let mut db = OptDb::open(".optdb/optdb.sqlite3", OpenMode::ReadWrite)?;
//! let archive = Archive::new(".optdb/.files");
//! let script = insert_script(&request, &archive, RunTokens::generate())?;
//! script.execute(&mut db)?;
//! ```

mod archive;
mod connection;
mod error;
mod query;
mod schema;
mod script;
mod serialize;
mod types;

pub use archive::{Archive, ArchivedFile, FileRole, Owner, content_hash, insert_file};
pub use connection::{OpenMode, OptDb, Schema, initialize};
pub use error::{Error, Result};
pub use schema::{SCHEMA_SQL, TABLES};
pub use script::{Script, literal, quote_text, text};
pub use serialize::{
    InsertRequest, ModelKey, ModelMeta, RunTokens, insert_script, serialize_data_set,
    serialize_model, serialize_solution,
};
pub use types::*;
