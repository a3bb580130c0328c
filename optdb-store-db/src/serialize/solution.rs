// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

use std::path::Path;

use optdb_model::{ModelInstance, SolverResults, canonical};
use rusqlite::types::Value as SqlValue;
use tracing::debug;

use super::{RunTokens, optional_text, token};
use crate::archive::{Archive, Owner, insert_file};
use crate::error::Result;
use crate::script::{Script, text};

const INSERT_SOLUTION: &str = r#"
INSERT OR IGNORE INTO solutions (data_set_id, solution_uuid, sol_message, sol_status, objective, gap, time_seconds)
VALUES ((SELECT data_set_id FROM data_sets WHERE data_set_uuid = ?1), ?2, ?3, ?4, ?5, ?6, ?7)
"#;

const INSERT_VAR_DATA: &str = r#"
INSERT OR IGNORE INTO variable_data (solution_id, var_id, index_str, value)
VALUES (
    (SELECT solution_id FROM solutions WHERE solution_uuid = ?1),
    (SELECT v.var_id FROM variables v
     JOIN data_sets d ON v.model_id = d.model_id
     JOIN solutions s ON s.data_set_id = d.data_set_id
     WHERE s.solution_uuid = ?1 AND v.var_name = ?2),
    ?3,
    ?4
)
"#;

fn optional_real(r: Option<f64>) -> SqlValue {
    r.map_or(SqlValue::Null, SqlValue::Real)
}

/// Append the solution row read from `results_file` and the value of every
/// variable entry.
///
/// Solver metadata comes from the results file itself, variable values from
/// the instance the solution was loaded onto.
pub fn serialize_solution(
    script: &mut Script,
    archive: &Archive,
    model: &ModelInstance,
    results_file: &Path,
    tokens: RunTokens,
) -> Result<()> {
    let results = SolverResults::read(results_file)?;
    let solver = results.solver_info()?;
    let solution = results.first_solution()?;

    script.push(
        INSERT_SOLUTION,
        [
            token(tokens.data_set),
            token(tokens.solution),
            optional_text(solver.message.as_deref()),
            text(&solver.termination_condition),
            SqlValue::Real(solution.objective_value()?),
            optional_real(solution.gap),
            optional_real(solver.time),
        ],
    );

    let mut rows = 0;
    for var in model.vars() {
        for entry in &var.entries {
            script.push(
                INSERT_VAR_DATA,
                [
                    token(tokens.solution),
                    text(&var.name),
                    text(&canonical(&entry.index)),
                    optional_real(entry.value),
                ],
            );
            rows += 1;
        }
    }
    debug!("serialized solution {} with {rows} rows", tokens.solution);

    insert_file(script, archive, results_file, Owner::Solution(tokens.solution))?;
    Ok(())
}
