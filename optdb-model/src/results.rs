// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Reader for solver result documents.
//!
//! The document is the JSON form of a solver results object:
//!
//! ```json
//! {
//!   "Problem": [{"Name": "unknown"}],
//!   "Solver": [{"Status": "ok", "Message": "Ipopt 3.14", "Termination condition": "optimal", "Time": 0.04}],
//!   "Solution": [
//!     {"number of solutions": 1, "number of solutions displayed": 1},
//!     {"Gap": "None", "Status": "optimal", "Objective": {"cost": {"Value": 153.675}},
//!      "Variable": {"ship[seattle,chicago]": {"Value": 300.0}}, "Constraint": {}}
//!   ]
//! }
//! ```
//!
//! The first element of `Solution` is a summary header; actual solutions
//! follow it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as Json};

use crate::error::{ModelError, Result};

/// Numbers that may also be spelled as strings, with `"None"` meaning absent.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Json::deserialize(deserializer)?;
    json_number(&value).map_err(serde::de::Error::custom)
}

fn json_number(value: &Json) -> std::result::Result<Option<f64>, String> {
    match value {
        Json::Null => Ok(None),
        Json::Number(n) => Ok(n.as_f64()),
        Json::String(s) if s.is_empty() || s.eq_ignore_ascii_case("none") => Ok(None),
        Json::String(s) => s
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("expected a number, got '{s}'")),
        other => Err(format!("expected a number, got {other}")),
    }
}

/// Strings where `null` and `"None"` both mean absent.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Json>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Json::Null) => None,
        Some(Json::String(s)) if s == "None" => None,
        Some(Json::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Status information reported by the solver.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolverInfo {
    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "Message", default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(rename = "Termination condition")]
    pub termination_condition: String,
    /// Wall-clock solve time in seconds.
    #[serde(rename = "Time", default, deserialize_with = "lenient_number")]
    pub time: Option<f64>,
}

/// One reported solution.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Solution {
    #[serde(rename = "Gap", default, deserialize_with = "lenient_number")]
    pub gap: Option<f64>,
    #[serde(rename = "Status", default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "Message", default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    /// Objective name to `{"Value": ..}`, in document order.
    #[serde(rename = "Objective", default)]
    pub objective: Map<String, Json>,
    /// Variable label to `{"Value": ..}`, in document order.
    #[serde(rename = "Variable", default)]
    pub variable: Map<String, Json>,
}

fn entry_value(name: &str, entry: &Json) -> Result<Option<f64>> {
    let value = match entry {
        Json::Object(fields) => fields.get("Value").unwrap_or(&Json::Null),
        other => other,
    };
    json_number(value).map_err(|reason| ModelError::MalformedResults(format!("{name}: {reason}")))
}

impl Solution {
    /// Value of the first listed objective.
    pub fn objective_value(&self) -> Result<f64> {
        let (name, entry) = self
            .objective
            .iter()
            .next()
            .ok_or_else(|| ModelError::MalformedResults("solution has no objective".to_owned()))?;
        entry_value(name, entry)?.ok_or_else(|| {
            ModelError::MalformedResults(format!("objective {name} has no value"))
        })
    }

    /// Reported variable values by label. Entries without a value are skipped.
    pub fn variable_values(&self) -> Result<Vec<(&str, f64)>> {
        let mut values = Vec::with_capacity(self.variable.len());
        for (label, entry) in &self.variable {
            if let Some(value) = entry_value(label, entry)? {
                values.push((label.as_str(), value));
            }
        }
        Ok(values)
    }
}

#[derive(Deserialize)]
struct RawResults {
    #[serde(rename = "Problem", default)]
    problem: Vec<Json>,
    #[serde(rename = "Solver", default)]
    solver: Vec<SolverInfo>,
    #[serde(rename = "Solution", default)]
    solution: Vec<Json>,
}

/// A parsed solver results document.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResults {
    pub problem: Vec<Json>,
    pub solver: Vec<SolverInfo>,
    pub solutions: Vec<Solution>,
}

impl SolverResults {
    /// Read and parse a results file.
    pub fn read(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path).map_err(|e| ModelError::read_file(path, e))?;
        Self::from_json(&input)
    }

    pub fn from_json(input: &str) -> Result<Self> {
        let raw: RawResults = serde_json::from_str(input)?;
        let solutions = raw
            .solution
            .into_iter()
            .skip(1)
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Solution>, _>>()?;
        Ok(Self {
            problem: raw.problem,
            solver: raw.solver,
            solutions,
        })
    }

    /// The first solver block.
    pub fn solver_info(&self) -> Result<&SolverInfo> {
        self.solver
            .first()
            .ok_or_else(|| ModelError::MalformedResults("no solver information".to_owned()))
    }

    /// The first reported solution.
    pub fn first_solution(&self) -> Result<&Solution> {
        self.solutions
            .first()
            .ok_or_else(|| ModelError::MalformedResults("no solution reported".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = r#"{
        "Problem": [{"Name": "unknown", "Lower bound": 153.675}],
        "Solver": [{"Status": "ok", "Message": "Ipopt 3.14.4\\x3a Optimal Solution Found", "Termination condition": "optimal", "Id": 0, "Error rc": 0, "Time": 0.0418}],
        "Solution": [
            {"number of solutions": 1, "number of solutions displayed": 1},
            {"Gap": "None", "Status": "optimal", "Message": "None",
             "Objective": {"cost": {"Value": 153.675}, "other": {"Value": 1}},
             "Variable": {"ship[seattle,chicago]": {"Value": 300.0}, "total": {"Value": 3}, "slack": {}},
             "Constraint": {"supply[seattle]": {"Dual": 0.0}}}
        ]
    }"#;

    #[test]
    fn test_parse_results() {
        let results = SolverResults::from_json(RESULTS).unwrap();
        let solver = results.solver_info().unwrap();
        assert_eq!(solver.termination_condition, "optimal");
        assert_eq!(solver.time, Some(0.0418));
        assert!(solver.message.as_deref().unwrap().starts_with("Ipopt"));

        let solution = results.first_solution().unwrap();
        assert_eq!(solution.gap, None);
        assert_eq!(solution.message, None);
        assert_eq!(solution.objective_value().unwrap(), 153.675);
        assert_eq!(
            solution.variable_values().unwrap(),
            vec![("ship[seattle,chicago]", 300.0), ("total", 3.0)]
        );
    }

    #[test]
    fn test_numeric_gap() {
        let results = SolverResults::from_json(
            r#"{"Solver": [{"Termination condition": "optimal"}],
                "Solution": [{}, {"Gap": 0.01, "Objective": {"o": {"Value": "2.5"}}}]}"#,
        )
        .unwrap();
        let solution = results.first_solution().unwrap();
        assert_eq!(solution.gap, Some(0.01));
        assert_eq!(solution.objective_value().unwrap(), 2.5);
        assert_eq!(results.solver_info().unwrap().time, None);
    }

    #[test]
    fn test_missing_solution() {
        let results = SolverResults::from_json(
            r#"{"Solver": [{"Termination condition": "infeasible"}],
                "Solution": [{"number of solutions": 0}]}"#,
        )
        .unwrap();
        assert!(matches!(
            results.first_solution(),
            Err(ModelError::MalformedResults(_))
        ));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            SolverResults::from_json("Problem:\n- Name: x\n"),
            Err(ModelError::ResultsParse(_))
        ));
    }
}
