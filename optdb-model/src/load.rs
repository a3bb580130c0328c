// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Binding reported variable values back onto a model instance.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::Result;
use crate::index::label;
use crate::instance::ModelInstance;
use crate::results::Solution;

/// Outcome of [`load_solution`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Entries bound to a reported value.
    pub bound: usize,
    /// Reported labels that match no variable entry.
    pub skipped: usize,
    /// Entries the solution did not mention, set to zero.
    pub defaulted: usize,
}

/// Copy the values of `solution` onto the variables of `instance`.
///
/// Labels are matched against `name[i,j]` of every variable entry. Entries
/// the solution leaves out become `0.0`, so every variable entry has a value
/// afterwards.
pub fn load_solution(instance: &mut ModelInstance, solution: &Solution) -> Result<LoadSummary> {
    let mut slots: HashMap<String, (usize, usize)> = HashMap::new();
    for (v, var) in instance.vars.iter().enumerate() {
        for (e, entry) in var.entries.iter().enumerate() {
            slots.insert(label(&var.name, &entry.index), (v, e));
        }
    }

    for var in &mut instance.vars {
        for entry in &mut var.entries {
            entry.value = None;
        }
    }

    let mut summary = LoadSummary::default();
    for (name, value) in solution.variable_values()? {
        match slots.get(name) {
            Some(&(v, e)) => {
                instance.vars[v].entries[e].value = Some(value);
                summary.bound += 1;
            }
            None => {
                warn!("solution reports unknown variable {name}, skipping");
                summary.skipped += 1;
            }
        }
    }

    for var in &mut instance.vars {
        for entry in var.entries.iter_mut().filter(|entry| entry.value.is_none()) {
            entry.value = Some(0.0);
            summary.defaulted += 1;
        }
    }

    debug!(
        "loaded solution: {} bound, {} skipped, {} defaulted",
        summary.bound, summary.skipped, summary.defaulted
    );
    Ok(summary)
}
