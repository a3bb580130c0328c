// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Optimization model instances for optdb.
//!
//! This crate turns a model definition and an optional AMPL-style data file
//! into a [`ModelInstance`], reads JSON solver results and binds the reported
//! variable values back onto the instance.

pub mod dat;
pub mod definition;
pub mod error;
pub mod index;
pub mod instance;
pub mod load;
pub mod results;
pub mod source;

pub use definition::ModelDefinition;
pub use error::{ModelError, Result};
pub use index::{Index, SCALAR_INDEX, Value, canonical, label};
pub use instance::{ModelInstance, Param, Set, SetMembers, Var, VarEntry};
pub use load::{LoadSummary, load_solution};
pub use results::{Solution, SolverInfo, SolverResults};
pub use source::{DefinitionFile, ModelSource};
