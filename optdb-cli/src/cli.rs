// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Store optimization models, data sets and solver results in SQLite.
#[derive(Parser, Debug)]
#[command(name = "optdb")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the configuration
    Config(ConfigArgs),

    /// Create the configured database and archive directory
    Init,

    /// Record a model, its data and a solver result
    Insert(InsertArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Provide a listing of the current config
    #[arg(short, long)]
    pub list: bool,

    /// Option to change, as `section.option`
    #[arg(required_unless_present = "list", requires = "value")]
    pub key: Option<String>,

    /// New value of the option
    #[arg(required_unless_present = "list")]
    pub value: Option<String>,
}

#[derive(Args, Debug)]
pub struct InsertArgs {
    /// Model definition file
    #[arg(short = 'm', long = "model-file")]
    pub model: PathBuf,

    /// AMPL-style data file instantiating the model
    #[arg(short = 'd', long = "dat-file")]
    pub data: Option<PathBuf>,

    /// Class tag stored with the model
    #[arg(long, default_value = "nlp")]
    pub model_class: String,

    /// Record the model as non-convex
    #[arg(long)]
    pub non_convex: bool,

    /// Solver results file (JSON)
    pub sol: PathBuf,
}
