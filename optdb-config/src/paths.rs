// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Locations of the local and global config files.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Directory holding the config file, both in the working directory and in
/// the user's home directory.
pub const CONFIG_DIR: &str = ".optdb";

/// File name of the config file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "optdb.ini";

/// The two candidate config files, in lookup order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Preferred file, relative to the working directory.
    pub local: PathBuf,
    /// Fallback file in the user's home directory.
    pub global: PathBuf,
}

impl ConfigPaths {
    /// Build the pair from the two directories that hold [`CONFIG_FILE`].
    pub fn new<L: AsRef<Path>, G: AsRef<Path>>(local_dir: L, global_dir: G) -> Self {
        Self {
            local: local_dir.as_ref().join(CONFIG_FILE),
            global: global_dir.as_ref().join(CONFIG_FILE),
        }
    }

    /// `./.optdb/optdb.ini` over `~/.optdb/optdb.ini`.
    pub fn discover() -> Result<Self> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(Path::new(CONFIG_DIR), home.join(CONFIG_DIR)))
    }
}
