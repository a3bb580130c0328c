// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

use std::path::Path;

use optdb_model::{ModelInstance, SCALAR_INDEX, Value, canonical};
use rusqlite::types::Value as SqlValue;
use tracing::debug;
use uuid::Uuid;

use super::{ModelKey, token};
use crate::archive::{Archive, Owner, insert_file};
use crate::error::{Error, Result};
use crate::script::{Script, text};

const INSERT_DATA_SET: &str = r#"
INSERT OR IGNORE INTO data_sets (data_set_uuid, model_id)
VALUES (?1, (SELECT model_id FROM models WHERE model_name = ?2 AND model_checksum = ?3))
"#;

const INSERT_PARAM_DATA: &str = r#"
INSERT OR IGNORE INTO parameter_data (data_set_id, param_id, index_str, value)
VALUES (
    (SELECT data_set_id FROM data_sets WHERE data_set_uuid = ?1),
    (SELECT p.param_id FROM parameters p JOIN data_sets d ON p.model_id = d.model_id
     WHERE d.data_set_uuid = ?1 AND p.param_name = ?2),
    ?3,
    ?4
)
"#;

const INSERT_SET_DATA: &str = r#"
INSERT OR IGNORE INTO set_data (data_set_id, set_id, index_str, value)
VALUES (
    (SELECT data_set_id FROM data_sets WHERE data_set_uuid = ?1),
    (SELECT s.set_id FROM sets s JOIN data_sets d ON s.model_id = d.model_id
     WHERE d.data_set_uuid = ?1 AND s.set_name = ?2),
    ?3,
    ?4
)
"#;

fn sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Int(i) => SqlValue::Integer(*i),
        Value::Real(r) => SqlValue::Real(*r),
        Value::Str(s) => SqlValue::Text(s.clone()),
    }
}

/// Append the data set row and the bound values of every parameter and set.
///
/// Indexed sets are rejected before anything is appended.
pub fn serialize_data_set(
    script: &mut Script,
    archive: &Archive,
    model: &ModelInstance,
    key: &ModelKey,
    data_set: Uuid,
    data_file: Option<&Path>,
) -> Result<()> {
    if let Some(set) = model.sets().iter().find(|s| s.is_indexed()) {
        return Err(Error::IndexedSetUnsupported(set.name.clone()));
    }

    script.push(
        INSERT_DATA_SET,
        [token(data_set), text(&key.name), text(&key.checksum)],
    );

    let mut rows = 0;
    for param in model.params() {
        for (index, value) in &param.entries {
            script.push(
                INSERT_PARAM_DATA,
                [
                    token(data_set),
                    text(&param.name),
                    text(&canonical(index)),
                    sql_value(value),
                ],
            );
            rows += 1;
        }
    }

    for set in model.sets() {
        for member in set.scalar_members().unwrap_or_default() {
            script.push(
                INSERT_SET_DATA,
                [
                    token(data_set),
                    text(&set.name),
                    text(SCALAR_INDEX),
                    text(&canonical(member)),
                ],
            );
            rows += 1;
        }
    }
    debug!("serialized data set {data_set} with {rows} rows");

    if let Some(path) = data_file {
        insert_file(script, archive, path, Owner::DataSet(data_set))?;
    }
    Ok(())
}
