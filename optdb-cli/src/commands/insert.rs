// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, info};
use optdb_config::{Config, ConfigPaths};
use optdb_model::{DefinitionFile, ModelSource, SolverResults, load_solution};
use optdb_store_db::{
    Archive, InsertRequest, ModelMeta, OpenMode, OptDb, RunTokens, insert_script,
};

use crate::cli::InsertArgs;
use crate::error::{CliError, IoContext};

/// Instantiate the model, load the solution and record everything in the store.
///
/// The rendered statements are written to `dump` before they are executed.
pub fn run(
    args: &InsertArgs,
    paths: &ConfigPaths,
    dump: &Path,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let config = Config::load(paths)?;
    let db_file = config.database_file()?;
    let archive = Archive::new(config.archive_dir()?);

    let source = DefinitionFile::new(&args.model);
    let mut instance = source.instantiate(args.data.as_deref())?;

    let results = SolverResults::read(&args.sol)?;
    let summary = load_solution(&mut instance, results.first_solution()?)?;
    info!(
        "loaded {}: {} values bound, {} labels skipped, {} entries defaulted to 0",
        args.sol.display(),
        summary.bound,
        summary.skipped,
        summary.defaulted
    );

    let tokens = RunTokens::generate();
    let request = InsertRequest {
        model: &instance,
        meta: ModelMeta {
            class: &args.model_class,
            is_convex: !args.non_convex,
            file: &args.model,
        },
        data_file: args.data.as_deref(),
        results_file: &args.sol,
    };
    let script = insert_script(&request, &archive, tokens)?;

    fs::write(dump, script.render())
        .io_context(|| format!("Failed to write {}", dump.display()))?;
    debug!("wrote {} statements to {}", script.len(), dump.display());

    let mut db = OptDb::open(&db_file, OpenMode::ReadWrite)?;
    let changed = script.execute(&mut db)?;
    info!(
        "inserted {changed} rows into {}; store now holds {} data sets and {} solutions",
        db_file.display(),
        db.count_rows("data_sets")?,
        db.count_rows("solutions")?
    );

    writeln!(
        out,
        "Inserted data set {} and solution {} for model {}",
        tokens.data_set, tokens.solution, instance.name
    )
    .io_context(|| "Failed to write to stdout".to_owned())?;
    Ok(())
}
