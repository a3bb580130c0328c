// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

mod cli;
mod commands;
mod error;
mod logging;

use std::path::Path;

use clap::Parser;
use log::{error, info};
use optdb_config::ConfigPaths;

use crate::cli::Cli;
use crate::error::CliError;

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init(Path::new(logging::LOG_FILE))?;
    info!("optdb {} starting: {:?}", env!("CARGO_PKG_VERSION"), cli.command);

    let result = ConfigPaths::discover()
        .map_err(CliError::from)
        .and_then(|paths| commands::run(cli.command, &paths));
    if let Err(e) = &result {
        error!("{e}");
    }
    result
}
