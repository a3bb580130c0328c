// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Read query operations for the store database.

use rusqlite::{Row, params};

use crate::archive::FileRole;
use crate::connection::OptDb;
use crate::error::{Error, Result};
use crate::schema::TABLES;
use crate::types::{DataRow, DataSetRow, FileRow, ModelRow, SolutionRow};

fn data_row(row: &Row<'_>) -> rusqlite::Result<DataRow> {
    Ok(DataRow {
        component: row.get(0)?,
        index: row.get(1)?,
        value: row.get(2)?,
    })
}

impl OptDb {
    /// Number of rows in one of the schema's tables.
    pub fn count_rows(&self, table: &str) -> Result<i64> {
        let table = TABLES
            .iter()
            .find(|t| **t == table)
            .ok_or_else(|| Error::UnknownTable(table.to_owned()))?;
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }

    /// All models sharing `name`, oldest first.
    pub fn model_by_name(&self, name: &str) -> Result<Vec<ModelRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT model_id, model_name, model_checksum, model_class, model_is_convex, description
            FROM models
            WHERE model_name = ?1
            ORDER BY model_id
            "#,
        )?;
        let rows = stmt.query_map(params![name], |row| {
            Ok(ModelRow {
                id: row.get(0)?,
                name: row.get(1)?,
                checksum: row.get(2)?,
                class: row.get(3)?,
                is_convex: row.get::<_, i64>(4)? != 0,
                description: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// All data sets, oldest first.
    pub fn data_sets(&self) -> Result<Vec<DataSetRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT data_set_id, data_set_uuid, model_id, created_at
            FROM data_sets
            ORDER BY data_set_id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(DataSetRow {
                id: row.get(0)?,
                uuid: row.get(1)?,
                model_id: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Solutions recorded for the data set with token `data_set_uuid`.
    pub fn solutions_for(&self, data_set_uuid: &str) -> Result<Vec<SolutionRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT s.solution_id, s.data_set_id, s.solution_uuid, s.sol_message, s.sol_status,
                   s.objective, s.gap, s.time_seconds
            FROM solutions s
            JOIN data_sets d ON s.data_set_id = d.data_set_id
            WHERE d.data_set_uuid = ?1
            ORDER BY s.solution_id
            "#,
        )?;
        let rows = stmt.query_map(params![data_set_uuid], |row| {
            Ok(SolutionRow {
                id: row.get(0)?,
                data_set_id: row.get(1)?,
                uuid: row.get(2)?,
                message: row.get(3)?,
                status: row.get(4)?,
                objective: row.get(5)?,
                gap: row.get(6)?,
                time_seconds: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Set members of a data set, in insertion order.
    pub fn set_data(&self, data_set_uuid: &str) -> Result<Vec<DataRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT s.set_name, sd.index_str, sd.value
            FROM set_data sd
            JOIN sets s ON sd.set_id = s.set_id
            JOIN data_sets d ON sd.data_set_id = d.data_set_id
            WHERE d.data_set_uuid = ?1
            ORDER BY sd.rowid
            "#,
        )?;
        let rows = stmt.query_map(params![data_set_uuid], data_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Parameter values of a data set, in insertion order.
    pub fn parameter_data(&self, data_set_uuid: &str) -> Result<Vec<DataRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT p.param_name, pd.index_str, pd.value
            FROM parameter_data pd
            JOIN parameters p ON pd.param_id = p.param_id
            JOIN data_sets d ON pd.data_set_id = d.data_set_id
            WHERE d.data_set_uuid = ?1
            ORDER BY pd.rowid
            "#,
        )?;
        let rows = stmt.query_map(params![data_set_uuid], data_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Variable values of a solution, in insertion order.
    pub fn variable_data(&self, solution_uuid: &str) -> Result<Vec<DataRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT v.var_name, vd.index_str, vd.value
            FROM variable_data vd
            JOIN variables v ON vd.var_id = v.var_id
            JOIN solutions s ON vd.solution_id = s.solution_id
            WHERE s.solution_uuid = ?1
            ORDER BY vd.rowid
            "#,
        )?;
        let rows = stmt.query_map(params![solution_uuid], data_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// All archived files.
    ///
    /// Fails with [`Error::UnknownRole`] if a row carries a role tag this
    /// crate does not know.
    pub fn files(&self) -> Result<Vec<FileRow>> {
        let mut stmt = self.conn.prepare_cached(
            r#"
            SELECT file_id, file_location, md5_checksum, file_kind, file_type
            FROM files
            ORDER BY file_id
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;
        let mut files = Vec::new();
        for row in rows {
            let (id, location, checksum, kind, file_type) = row?;
            files.push(FileRow {
                id,
                location,
                checksum,
                role: kind.parse()?,
                file_type,
            });
        }
        Ok(files)
    }
}
