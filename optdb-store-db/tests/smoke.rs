// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Smoke tests for optdb-store-db.
//!
//! Each test builds a store in a temporary directory, runs complete insert
//! pipelines against it and checks the resulting rows.

use std::fs;
use std::path::{Path, PathBuf};

use optdb_model::{DefinitionFile, ModelSource, SolverResults, load_solution};
use optdb_store_db::{
    Archive, Error, FileRole, InsertRequest, ModelMeta, OptDb, RunTokens, Schema, Script,
    content_hash, initialize, insert_script,
};
use proptest::prelude::*;
use rusqlite::types::Value as SqlValue;
use tempfile::TempDir;

const MODEL: &str = r#"
name = "toy"
doc = "Toy allocation"

[[sets]]
name = "I"
doc = "items"

[[params]]
name = "c"
index = ["I"]

[[params]]
name = "budget"
value = 10

[[vars]]
name = "x"
index = ["I"]

[[vars]]
name = "slack"
"#;

const DATA: &str = "set I := a 'b''s';\nparam c := a 1.5 'b''s' 2;\n";

const RESULTS: &str = r#"{
    "Problem": [{"Name": "unknown"}],
    "Solver": [{"Status": "ok", "Message": "Ipopt 3.14: Optimal Solution Found", "Termination condition": "optimal", "Time": 0.25}],
    "Solution": [
        {"number of solutions": 1, "number of solutions displayed": 1},
        {"Gap": "None", "Status": "optimal",
         "Objective": {"cost": {"Value": 2.5}},
         "Variable": {"x[a]": {"Value": 1}, "x[b's]": {"Value": 0.5}, "ghost": {"Value": 9}},
         "Constraint": {}}
    ]
}"#;

struct Fixture {
    _dir: TempDir,
    db_file: PathBuf,
    archive: Archive,
    model: PathBuf,
    data: PathBuf,
    results: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        Self::with_model(MODEL)
    }

    fn with_model(model: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let db_file = dir.path().join("store/optdb.sqlite3");
        let archive_dir = dir.path().join("store/.files");
        initialize(&db_file, &archive_dir, Schema::Bundled).unwrap();

        let write = |name: &str, contents: &str| {
            let path = dir.path().join(name);
            fs::write(&path, contents).unwrap();
            path
        };
        Self {
            model: write("toy.toml", model),
            data: write("toy.dat", DATA),
            results: write("toy.sol.json", RESULTS),
            db_file,
            archive: Archive::new(archive_dir),
            _dir: dir,
        }
    }

    fn db(&self) -> OptDb {
        OptDb::open(&self.db_file, optdb_store_db::OpenMode::ReadWrite).unwrap()
    }

    fn script(&self, model: &Path, tokens: RunTokens) -> optdb_store_db::Result<Script> {
        let mut instance = DefinitionFile::new(model).instantiate(Some(&self.data))?;
        let results = SolverResults::read(&self.results)?;
        load_solution(&mut instance, results.first_solution()?)?;
        let request = InsertRequest {
            model: &instance,
            meta: ModelMeta {
                class: "nlp",
                is_convex: true,
                file: model,
            },
            data_file: Some(&self.data),
            results_file: &self.results,
        };
        insert_script(&request, &self.archive, tokens)
    }

    fn insert(&self) -> RunTokens {
        let tokens = RunTokens::generate();
        let script = self.script(&self.model, tokens).unwrap();
        script.execute(&mut self.db()).unwrap();
        tokens
    }
}

fn text_rows(rows: &[optdb_store_db::DataRow]) -> Vec<(String, String, SqlValue)> {
    rows.iter()
        .map(|r| (r.component.clone(), r.index.clone(), r.value.clone()))
        .collect()
}

/// One insert populates every table it touches.
#[test]
fn test_single_insert() {
    let fixture = Fixture::new();
    let tokens = fixture.insert();
    let db = fixture.db();

    let models = db.model_by_name("toy").unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].class.as_deref(), Some("nlp"));
    assert!(models[0].is_convex);
    assert_eq!(models[0].description.as_deref(), Some("Toy allocation"));
    assert_eq!(models[0].checksum, content_hash(&fixture.model).unwrap());

    assert_eq!(db.count_rows("parameters").unwrap(), 2);
    assert_eq!(db.count_rows("sets").unwrap(), 1);
    assert_eq!(db.count_rows("variables").unwrap(), 2);

    let data_sets = db.data_sets().unwrap();
    assert_eq!(data_sets.len(), 1);
    assert_eq!(data_sets[0].uuid, tokens.data_set.to_string());
    assert_eq!(data_sets[0].model_id, models[0].id);

    let solutions = db.solutions_for(&data_sets[0].uuid).unwrap();
    assert_eq!(solutions.len(), 1);
    let solution = &solutions[0];
    assert_eq!(solution.data_set_id, data_sets[0].id);
    assert_eq!(solution.uuid, tokens.solution.to_string());
    assert_eq!(solution.status, "optimal");
    assert_eq!(
        solution.message.as_deref(),
        Some("Ipopt 3.14: Optimal Solution Found")
    );
    assert_eq!(solution.objective, Some(2.5));
    assert_eq!(solution.gap, None);
    assert_eq!(solution.time_seconds, Some(0.25));

    let files = db.files().unwrap();
    let roles: Vec<FileRole> = files.iter().map(|f| f.role).collect();
    assert_eq!(roles, [FileRole::Model, FileRole::Data, FileRole::Sol]);
    assert_eq!(files[2].file_type, ".sol.json");
    assert!(files[2].location.ends_with(&format!("{}.json", files[2].checksum)));
    assert_eq!(db.count_rows("model_has_file").unwrap(), 1);
    assert_eq!(db.count_rows("data_set_has_file").unwrap(), 1);
    assert_eq!(db.count_rows("solution_has_file").unwrap(), 1);
}

/// Rerunning the same insert dedupes the model and files but records a new
/// data set and solution.
#[test]
fn test_insert_twice() {
    let fixture = Fixture::new();
    let first = fixture.insert();
    let second = fixture.insert();
    assert_ne!(first, second);

    let db = fixture.db();
    assert_eq!(db.count_rows("models").unwrap(), 1);
    assert_eq!(db.count_rows("parameters").unwrap(), 2);
    assert_eq!(db.count_rows("files").unwrap(), 3);
    assert_eq!(db.count_rows("model_has_file").unwrap(), 1);
    assert_eq!(db.count_rows("data_sets").unwrap(), 2);
    assert_eq!(db.count_rows("solutions").unwrap(), 2);
    assert_eq!(db.count_rows("data_set_has_file").unwrap(), 2);
    assert_eq!(db.count_rows("solution_has_file").unwrap(), 2);
    assert_eq!(
        fs::read_dir(fixture.archive.dir()).unwrap().count(),
        3,
        "identical contents share one archive file"
    );

    for tokens in [first, second] {
        let solutions = db.solutions_for(&tokens.data_set.to_string()).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].uuid, tokens.solution.to_string());
    }
}

/// Scalar set members are stored under the `None` index, quotes intact.
#[test]
fn test_set_members_with_quotes() {
    let fixture = Fixture::new();
    let tokens = fixture.insert();
    let db = fixture.db();

    let rows = text_rows(&db.set_data(&tokens.data_set.to_string()).unwrap());
    assert_eq!(
        rows,
        [
            ("I".to_owned(), "None".to_owned(), SqlValue::Text("a".into())),
            ("I".to_owned(), "None".to_owned(), SqlValue::Text("b's".into())),
        ]
    );

    let script = fixture.script(&fixture.model, RunTokens::generate()).unwrap();
    let dump = script.render();
    assert!(dump.contains("'b''s'"), "{dump}");
    assert!(!dump.contains("?1"), "{dump}");
}

#[test]
fn test_parameter_and_variable_rows() {
    let fixture = Fixture::new();
    let tokens = fixture.insert();
    let db = fixture.db();

    let params = text_rows(&db.parameter_data(&tokens.data_set.to_string()).unwrap());
    assert_eq!(
        params,
        [
            ("c".to_owned(), "a".to_owned(), SqlValue::Real(1.5)),
            ("c".to_owned(), "b's".to_owned(), SqlValue::Integer(2)),
            ("budget".to_owned(), "None".to_owned(), SqlValue::Integer(10)),
        ]
    );

    let vars = text_rows(&db.variable_data(&tokens.solution.to_string()).unwrap());
    assert_eq!(
        vars,
        [
            ("x".to_owned(), "a".to_owned(), SqlValue::Real(1.0)),
            ("x".to_owned(), "b's".to_owned(), SqlValue::Real(0.5)),
            ("slack".to_owned(), "None".to_owned(), SqlValue::Real(0.0)),
        ]
    );
}

/// The rendered dump is a script producing the same rows.
#[test]
fn test_rendered_script_matches() {
    let fixture = Fixture::new();
    let tokens = RunTokens::generate();
    let script = fixture.script(&fixture.model, tokens).unwrap();

    let mut bound = OptDb::open_memory().unwrap();
    script.execute(&mut bound).unwrap();
    let rendered = OptDb::open_memory().unwrap();
    rendered.connection().execute_batch(&script.render()).unwrap();

    let data_set = tokens.data_set.to_string();
    let solution = tokens.solution.to_string();
    for db in [&bound, &rendered] {
        assert_eq!(db.count_rows("files").unwrap(), 3);
        assert_eq!(db.count_rows("model_has_file").unwrap(), 1);
    }
    assert_eq!(bound.model_by_name("toy").unwrap(), rendered.model_by_name("toy").unwrap());
    assert_eq!(
        bound.parameter_data(&data_set).unwrap(),
        rendered.parameter_data(&data_set).unwrap()
    );
    assert_eq!(bound.set_data(&data_set).unwrap(), rendered.set_data(&data_set).unwrap());
    assert_eq!(
        bound.solutions_for(&data_set).unwrap(),
        rendered.solutions_for(&data_set).unwrap()
    );
    assert_eq!(
        bound.variable_data(&solution).unwrap(),
        rendered.variable_data(&solution).unwrap()
    );
    assert_eq!(bound.files().unwrap(), rendered.files().unwrap());
}

/// A model file with different contents under the same name is a new model.
#[test]
fn test_same_name_different_file() {
    let fixture = Fixture::new();
    fixture.insert();

    let edited = fixture.model.with_file_name("toy-v2.toml");
    fs::write(&edited, format!("{MODEL}\n# tweaked\n")).unwrap();
    let script = fixture.script(&edited, RunTokens::generate()).unwrap();
    script.execute(&mut fixture.db()).unwrap();

    let db = fixture.db();
    let models = db.model_by_name("toy").unwrap();
    assert_eq!(models.len(), 2);
    assert_ne!(models[0].checksum, models[1].checksum);
    assert_eq!(db.count_rows("parameters").unwrap(), 4);
}

#[test]
fn test_indexed_set_is_rejected() {
    let fixture = Fixture::with_model(&format!(
        "{MODEL}\n[[sets]]\nname = \"J\"\nindex = [\"I\"]\n"
    ));
    let err = fixture
        .script(&fixture.model, RunTokens::generate())
        .unwrap_err();
    assert!(matches!(err, Error::IndexedSetUnsupported(name) if name == "J"));
}

#[test]
fn test_init_twice_fails() {
    let fixture = Fixture::new();
    let archive = fixture.archive.dir().to_owned();
    let err = initialize(&fixture.db_file, &archive, Schema::Bundled).err();
    assert!(matches!(err, Some(Error::DatabaseExists(_))));
    assert!(fixture.db().has_schema().unwrap());
}

proptest! {
    #[test]
    fn content_hash_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, &bytes).unwrap();
        let first = content_hash(&path).unwrap();
        prop_assert_eq!(&first, &content_hash(&path).unwrap());
        prop_assert_eq!(first.len(), 32);
        prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn quoted_text_survives_sqlite(s in "\\PC{0,24}") {
        let db = OptDb::open_memory().unwrap();
        let sql = format!("SELECT {}", optdb_store_db::quote_text(&s));
        let back: String = db.connection().query_row(&sql, [], |row| row.get(0)).unwrap();
        prop_assert_eq!(back, s);
    }
}
