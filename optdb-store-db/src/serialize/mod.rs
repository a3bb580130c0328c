// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Serializers turning a solved model instance into insert statements.
//!
//! Rows never carry resolved numeric keys. Each statement looks its parents
//! up by natural key (model name and checksum, data set or solution token)
//! when it runs, so reruns against an existing store only add what is new.

mod data_set;
mod model;
mod solution;

use std::path::Path;

use optdb_model::ModelInstance;
use rusqlite::types::Value as SqlValue;
use tracing::info;
use uuid::Uuid;

use crate::archive::Archive;
use crate::error::Result;
use crate::script::Script;

pub use data_set::serialize_data_set;
pub use model::{ModelKey, ModelMeta, serialize_model};
pub use solution::serialize_solution;

/// Tokens identifying the rows one insert run creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTokens {
    pub data_set: Uuid,
    pub solution: Uuid,
}

impl RunTokens {
    /// Fresh time-ordered tokens.
    pub fn generate() -> Self {
        Self {
            data_set: Uuid::now_v7(),
            solution: Uuid::now_v7(),
        }
    }
}

/// Everything one insert run records.
#[derive(Debug, Clone, Copy)]
pub struct InsertRequest<'a> {
    /// Instance with the solution already loaded.
    pub model: &'a ModelInstance,
    pub meta: ModelMeta<'a>,
    pub data_file: Option<&'a Path>,
    pub results_file: &'a Path,
}

/// Build the complete script for one insert run: model, data set, solution.
pub fn insert_script(
    request: &InsertRequest<'_>,
    archive: &Archive,
    tokens: RunTokens,
) -> Result<Script> {
    let mut script = Script::new();
    let key = serialize_model(&mut script, archive, request.model, &request.meta)?;
    serialize_data_set(
        &mut script,
        archive,
        request.model,
        &key,
        tokens.data_set,
        request.data_file,
    )?;
    serialize_solution(
        &mut script,
        archive,
        request.model,
        request.results_file,
        tokens,
    )?;
    info!(
        "prepared {} statements for model {} (data set {}, solution {})",
        script.len(),
        key.name,
        tokens.data_set,
        tokens.solution
    );
    Ok(script)
}

fn token(uuid: Uuid) -> SqlValue {
    SqlValue::Text(uuid.to_string())
}

fn optional_text(s: Option<&str>) -> SqlValue {
    s.map_or(SqlValue::Null, |s| SqlValue::Text(s.to_owned()))
}
