// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Pluggable model sources.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::definition::ModelDefinition;
use crate::error::{ModelError, Result};
use crate::instance::ModelInstance;

/// Anything that can produce a fully parameterized model instance from an
/// optional data source.
pub trait ModelSource {
    fn instantiate(&self, data: Option<&Path>) -> Result<ModelInstance>;
}

impl ModelSource for ModelDefinition {
    fn instantiate(&self, data: Option<&Path>) -> Result<ModelInstance> {
        self.instantiate_from(data)
    }
}

/// A model definition stored as a TOML file.
#[derive(Debug, Clone)]
pub struct DefinitionFile {
    path: PathBuf,
}

impl DefinitionFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ModelDefinition> {
        debug!("reading model definition {}", self.path.display());
        let input = fs::read_to_string(&self.path)
            .map_err(|e| ModelError::read_file(&self.path, e))?;
        ModelDefinition::from_toml(&input)
    }
}

impl ModelSource for DefinitionFile {
    fn instantiate(&self, data: Option<&Path>) -> Result<ModelInstance> {
        self.load()?.instantiate(data)
    }
}
