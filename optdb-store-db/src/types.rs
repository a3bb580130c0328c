// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Database row types.

use rusqlite::types::Value as SqlValue;

use crate::archive::FileRole;

/// A row of the `models` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    pub id: i64,
    pub name: String,
    /// MD5 of the model file
    pub checksum: String,
    pub class: Option<String>,
    pub is_convex: bool,
    pub description: Option<String>,
}

/// A row of the `data_sets` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSetRow {
    pub id: i64,
    pub uuid: String,
    pub model_id: i64,
    /// SQLite `CURRENT_TIMESTAMP` at insertion
    pub created_at: String,
}

/// A row of the `solutions` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionRow {
    pub id: i64,
    pub data_set_id: i64,
    pub uuid: String,
    pub message: Option<String>,
    /// Termination condition reported by the solver
    pub status: String,
    pub objective: Option<f64>,
    pub gap: Option<f64>,
    pub time_seconds: Option<f64>,
}

/// One `parameter_data`, `set_data` or `variable_data` row, with the
/// component resolved to its name.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub component: String,
    pub index: String,
    pub value: SqlValue,
}

/// A row of the `files` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub id: i64,
    pub location: String,
    pub checksum: String,
    pub role: FileRole,
    pub file_type: String,
}
