// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

use std::io::Write;

use log::info;
use optdb_config::{Config, ConfigPaths};

use crate::cli::ConfigArgs;
use crate::error::{CliError, IoContext};

/// List the active config, or set one option in the local file.
pub fn run(args: &ConfigArgs, paths: &ConfigPaths, out: &mut dyn Write) -> Result<(), CliError> {
    let mut config = Config::load(paths)?;

    if let (Some(key), Some(value)) = (&args.key, &args.value) {
        config.set(key, value)?;
        config.persist(&paths.local)?;
        info!("set {key} = {value} in {}", paths.local.display());
    }

    if args.list {
        write!(out, "{config}").io_context(|| "Failed to write config listing".to_owned())?;
    }
    Ok(())
}
