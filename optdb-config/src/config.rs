// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! The config document and its typed accessors.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, LineSeparator, ParseOption, Properties, WriteOption};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::paths::{CONFIG_DIR, ConfigPaths};

/// Section describing the SQLite database.
pub const SQLITE_SECTION: &str = "sqlite3";
/// Section describing the file archive.
pub const ARCHIVE_SECTION: &str = "archive";
/// Schema value selecting the script compiled into the binary.
pub const BUNDLED_SCHEMA: &str = "bundled";

/// Where `init` takes its schema script from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// The schema shipped with optdb.
    Bundled,
    /// A user supplied SQL script.
    Script(PathBuf),
}

/// Values are taken verbatim: no quote stripping, no backslash escapes.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn write_option() -> WriteOption {
    WriteOption {
        escape_policy: EscapePolicy::Nothing,
        line_separator: LineSeparator::SystemDefault,
        kv_separator: " = ",
    }
}

/// Default document written when neither config file exists.
fn default_document() -> Ini {
    let mut doc = Ini::new();
    doc.with_section(Some(SQLITE_SECTION))
        .set("file", format!("{CONFIG_DIR}/optdb.sqlite3"))
        .set("schema", BUNDLED_SCHEMA);
    doc.with_section(Some(ARCHIVE_SECTION))
        .set("directory", format!("{CONFIG_DIR}/.files"));
    doc
}

/// A loaded config file: sections of string options.
#[derive(Debug, Clone)]
pub struct Config {
    doc: Ini,
    source: PathBuf,
}

impl Config {
    /// Load the local file if present, else the global one.
    ///
    /// When neither exists the global file is created with default values.
    pub fn load(paths: &ConfigPaths) -> Result<Self> {
        if paths.local.exists() {
            debug!("reading {}", paths.local.display());
            return Self::read(&paths.local);
        }

        debug!(
            "no local config file found, trying to read {}",
            paths.global.display()
        );
        if paths.global.exists() {
            return Self::read(&paths.global);
        }

        debug!("{} does not exist. Creating default.", paths.global.display());
        let mut config = Self {
            doc: default_document(),
            source: paths.global.clone(),
        };
        config.persist(&paths.global)?;
        Ok(config)
    }

    /// Parse a config file at an explicit path.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_owned(),
            source,
        })?;
        let doc = Ini::load_from_str_opt(&contents, parse_option()).map_err(|source| {
            ConfigError::Parse {
                path: path.to_owned(),
                source,
            }
        })?;
        Ok(Self {
            doc,
            source: path.to_owned(),
        })
    }

    /// The file this config was read from or last written to.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Write the document to `path`, creating its directory if needed.
    pub fn persist(&mut self, path: &Path) -> Result<()> {
        let write_error = |source| ConfigError::WriteFile {
            path: path.to_owned(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                debug!("creating directory {}", parent.display());
                fs::create_dir_all(parent).map_err(write_error)?;
            }
        }

        let mut contents = Vec::new();
        self.doc
            .write_to_opt(&mut contents, write_option())
            .map_err(write_error)?;
        debug!("writing to {}", path.display());
        fs::write(path, contents).map_err(write_error)?;
        self.source = path.to_owned();
        Ok(())
    }

    /// Iterate named sections in file order. Keys above the first header
    /// belong to no section and are skipped.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Properties)> {
        self.doc
            .iter()
            .filter_map(|(name, props)| name.map(|n| (n, props)))
    }

    fn section(&self, name: &str) -> Result<&Properties> {
        self.doc
            .section(Some(name))
            .ok_or_else(|| ConfigError::NoSection(name.to_owned()))
    }

    /// Look up an option.
    pub fn get(&self, section: &str, option: &str) -> Result<&str> {
        self.section(section)?
            .get(option)
            .ok_or_else(|| ConfigError::NoOption {
                section: section.to_owned(),
                option: option.to_owned(),
            })
    }

    /// Overwrite an existing option given as `section.option`.
    ///
    /// Unknown sections and options are rejected rather than created.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, option) = key
            .split_once('.')
            .ok_or_else(|| ConfigError::MalformedKey(key.to_owned()))?;

        let props = self
            .doc
            .section_mut(Some(section))
            .ok_or_else(|| ConfigError::NoSection(section.to_owned()))?;
        if !props.contains_key(option) {
            return Err(ConfigError::NoOption {
                section: section.to_owned(),
                option: option.to_owned(),
            });
        }
        props.insert(option, value);
        Ok(())
    }

    fn path(&self, section: &str, option: &str) -> Result<PathBuf> {
        let value = self.get(section, option)?;
        if value.trim().is_empty() {
            return Err(ConfigError::invalid(section, option, "path is empty"));
        }
        Ok(PathBuf::from(value))
    }

    /// `sqlite3.file`
    pub fn database_file(&self) -> Result<PathBuf> {
        self.path(SQLITE_SECTION, "file")
    }

    /// `sqlite3.schema`
    pub fn schema(&self) -> Result<SchemaSource> {
        let path = self.path(SQLITE_SECTION, "schema")?;
        if path.as_os_str() == BUNDLED_SCHEMA {
            Ok(SchemaSource::Bundled)
        } else {
            Ok(SchemaSource::Script(path))
        }
    }

    /// `archive.directory`
    pub fn archive_dir(&self) -> Result<PathBuf> {
        self.path(ARCHIVE_SECTION, "directory")
    }
}

/// The `config --list` rendering: one line per section, one indented
/// `key: value` line per option.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, section) in self.sections() {
            writeln!(f, "{name}")?;
            for (key, value) in section.iter() {
                writeln!(f, "\t{key}: {value}")?;
            }
        }
        Ok(())
    }
}
