// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Content-addressed archive of ingested files.
//!
//! Every model, data and results file is copied to `<dir>/<md5><suffix>`
//! and recorded once in the `files` table, keyed by its checksum. Join rows
//! link the file to the model, data set or solution it documents.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rusqlite::types::Value as SqlValue;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::script::{Script, text};

const INSERT_FILE: &str = r#"
INSERT OR IGNORE INTO files (file_location, md5_checksum, file_kind, file_type)
VALUES (?1, ?2, ?3, ?4)
"#;

const LINK_MODEL: &str = r#"
INSERT OR IGNORE INTO model_has_file (model_id, file_id)
VALUES (
    (SELECT model_id FROM models WHERE model_name = ?1 AND model_checksum = ?2),
    (SELECT file_id FROM files WHERE md5_checksum = ?3)
)
"#;

const LINK_DATA_SET: &str = r#"
INSERT OR IGNORE INTO data_set_has_file (data_set_id, file_id)
VALUES (
    (SELECT data_set_id FROM data_sets WHERE data_set_uuid = ?1),
    (SELECT file_id FROM files WHERE md5_checksum = ?2)
)
"#;

const LINK_SOLUTION: &str = r#"
INSERT OR IGNORE INTO solution_has_file (solution_id, file_id)
VALUES (
    (SELECT solution_id FROM solutions WHERE solution_uuid = ?1),
    (SELECT file_id FROM files WHERE md5_checksum = ?2)
)
"#;

/// What an archived file documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Model,
    Data,
    Sol,
}

impl FileRole {
    pub fn as_str(self) -> &'static str {
        match self {
            FileRole::Model => "model",
            FileRole::Data => "data",
            FileRole::Sol => "sol",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "model" => Ok(FileRole::Model),
            "data" => Ok(FileRole::Data),
            "sol" => Ok(FileRole::Sol),
            other => Err(Error::UnknownRole(other.to_owned())),
        }
    }
}

/// The row a file gets linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner<'a> {
    Model { name: &'a str, checksum: &'a str },
    DataSet(Uuid),
    Solution(Uuid),
}

impl Owner<'_> {
    pub fn role(&self) -> FileRole {
        match self {
            Owner::Model { .. } => FileRole::Model,
            Owner::DataSet(_) => FileRole::Data,
            Owner::Solution(_) => FileRole::Sol,
        }
    }
}

/// A file copied into the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedFile {
    pub location: PathBuf,
    /// Lowercase hex MD5 of the contents.
    pub checksum: String,
    pub role: FileRole,
    /// Every suffix of the source file name, e.g. `.tar.gz`.
    pub file_type: String,
}

/// Lowercase hex MD5 of a file's bytes.
pub fn content_hash(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io("read", path, e))?;
    Ok(format!("{:x}", md5::compute(bytes)))
}

/// All suffixes of a file name, ignoring leading dots: `a.tar.gz` gives
/// `.tar.gz`, `.bashrc` gives nothing.
fn suffix_chain(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let trimmed = name.trim_start_matches('.');
    match trimmed.find('.') {
        Some(start) if !trimmed.ends_with('.') => trimmed[start..].to_owned(),
        _ => String::new(),
    }
}

fn last_suffix(path: &Path) -> String {
    let chain = suffix_chain(path);
    match chain.rfind('.') {
        Some(start) => chain[start..].to_owned(),
        None => chain,
    }
}

/// An existing archive directory.
#[derive(Debug, Clone)]
pub struct Archive {
    dir: PathBuf,
}

impl Archive {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `path` into the archive under its content hash.
    ///
    /// Storing the same contents again overwrites the same archive file.
    pub fn store(&self, path: &Path, role: FileRole) -> Result<ArchivedFile> {
        if !self.dir.is_dir() {
            return Err(Error::ArchiveMissing(self.dir.clone()));
        }
        let checksum = content_hash(path)?;
        let location = self.dir.join(format!("{checksum}{}", last_suffix(path)));
        fs::copy(path, &location).map_err(|e| Error::io("copy", path, e))?;
        debug!(
            "archived {} {} as {}",
            role,
            path.display(),
            location.display()
        );
        Ok(ArchivedFile {
            location,
            checksum,
            role,
            file_type: suffix_chain(path),
        })
    }
}

/// Archive `path` and append the statements recording it for `owner`.
pub fn insert_file(
    script: &mut Script,
    archive: &Archive,
    path: &Path,
    owner: Owner<'_>,
) -> Result<ArchivedFile> {
    let file = archive.store(path, owner.role())?;
    script.push(
        INSERT_FILE,
        [
            text(&file.location.to_string_lossy()),
            text(&file.checksum),
            text(file.role.as_str()),
            text(&file.file_type),
        ],
    );
    let checksum = text(&file.checksum);
    match owner {
        Owner::Model { name, checksum: model_checksum } => {
            script.push(LINK_MODEL, [text(name), text(model_checksum), checksum]);
        }
        Owner::DataSet(token) => {
            script.push(LINK_DATA_SET, [SqlValue::Text(token.to_string()), checksum]);
        }
        Owner::Solution(token) => {
            script.push(LINK_SOLUTION, [SqlValue::Text(token.to_string()), checksum]);
        }
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case("model.toml", ".toml", ".toml")]
    #[case("run.sol.json", ".sol.json", ".json")]
    #[case(".hidden", "", "")]
    #[case("plain", "", "")]
    fn test_suffixes(#[case] name: &str, #[case] chain: &str, #[case] last: &str) {
        assert_eq!(suffix_chain(Path::new(name)), chain);
        assert_eq!(last_suffix(Path::new(name)), last);
    }

    #[rstest]
    #[case("model", FileRole::Model)]
    #[case("data", FileRole::Data)]
    #[case("sol", FileRole::Sol)]
    fn test_role_roundtrip(#[case] tag: &str, #[case] role: FileRole) {
        assert_eq!(tag.parse::<FileRole>().unwrap(), role);
        assert_eq!(role.as_str(), tag);
    }

    #[test]
    fn test_unknown_role() {
        assert!(matches!(
            "solution".parse::<FileRole>(),
            Err(Error::UnknownRole(tag)) if tag == "solution"
        ));
    }

    #[test]
    fn test_store_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let archive_dir = dir.path().join("files");
        fs::create_dir(&archive_dir).unwrap();
        let source = dir.path().join("data.dat");
        fs::write(&source, "set I := a b;\n").unwrap();

        let archive = Archive::new(&archive_dir);
        let first = archive.store(&source, FileRole::Data).unwrap();
        let second = archive.store(&source, FileRole::Data).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.location,
            archive_dir.join(format!("{}.dat", first.checksum))
        );
        assert_eq!(fs::read_dir(&archive_dir).unwrap().count(), 1);
    }

    #[test]
    fn test_store_requires_directory() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("model.toml");
        fs::write(&source, "name = \"m\"\n").unwrap();
        let archive = Archive::new(dir.path().join("missing"));
        assert!(matches!(
            archive.store(&source, FileRole::Model),
            Err(Error::ArchiveMissing(_))
        ));
    }

    #[test]
    fn test_known_digest() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("empty");
        fs::write(&source, "").unwrap();
        assert_eq!(
            content_hash(&source).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }
}
