// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

use std::path::Path;

use optdb_model::ModelInstance;
use rusqlite::types::Value as SqlValue;
use tracing::debug;

use super::optional_text;
use crate::archive::{Archive, Owner, content_hash, insert_file};
use crate::error::Result;
use crate::script::{Script, text};

const INSERT_MODEL: &str = r#"
INSERT OR IGNORE INTO models (model_name, model_checksum, model_class, model_is_convex, description)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

const INSERT_PARAM: &str = r#"
INSERT OR IGNORE INTO parameters (model_id, param_name, description)
VALUES ((SELECT model_id FROM models WHERE model_name = ?1 AND model_checksum = ?2), ?3, ?4)
"#;

const INSERT_SET: &str = r#"
INSERT OR IGNORE INTO sets (model_id, set_name, description)
VALUES ((SELECT model_id FROM models WHERE model_name = ?1 AND model_checksum = ?2), ?3, ?4)
"#;

const INSERT_VAR: &str = r#"
INSERT OR IGNORE INTO variables (model_id, var_name, description)
VALUES ((SELECT model_id FROM models WHERE model_name = ?1 AND model_checksum = ?2), ?3, ?4)
"#;

/// Classification recorded with a model.
#[derive(Debug, Clone, Copy)]
pub struct ModelMeta<'a> {
    /// Free-form class tag such as `nlp`.
    pub class: &'a str,
    pub is_convex: bool,
    /// The file the model was defined in.
    pub file: &'a Path,
}

/// Natural key of a model row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelKey {
    pub name: String,
    /// Content hash of the model file.
    pub checksum: String,
}

impl ModelKey {
    fn params(&self) -> [SqlValue; 2] {
        [text(&self.name), text(&self.checksum)]
    }
}

/// Append the model row, one row per declared component and the archived
/// model file.
pub fn serialize_model(
    script: &mut Script,
    archive: &Archive,
    model: &ModelInstance,
    meta: &ModelMeta<'_>,
) -> Result<ModelKey> {
    let key = ModelKey {
        name: model.name.clone(),
        checksum: content_hash(meta.file)?,
    };

    script.push(
        INSERT_MODEL,
        [
            text(&key.name),
            text(&key.checksum),
            text(meta.class),
            SqlValue::Integer(i64::from(meta.is_convex)),
            optional_text(model.doc.as_deref()),
        ],
    );

    let components = model
        .params()
        .iter()
        .map(|p| (INSERT_PARAM, &p.name, &p.doc))
        .chain(model.sets().iter().map(|s| (INSERT_SET, &s.name, &s.doc)))
        .chain(model.vars().iter().map(|v| (INSERT_VAR, &v.name, &v.doc)));
    for (sql, name, doc) in components {
        let [model_name, checksum] = key.params();
        script.push(
            sql,
            [model_name, checksum, text(name), optional_text(doc.as_deref())],
        );
    }
    debug!(
        "serialized model {} ({} params, {} sets, {} vars)",
        key.name,
        model.params().len(),
        model.sets().len(),
        model.vars().len()
    );

    insert_file(
        script,
        archive,
        meta.file,
        Owner::Model {
            name: &key.name,
            checksum: &key.checksum,
        },
    )?;
    Ok(key)
}
