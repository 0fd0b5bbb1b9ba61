//! Argument parsing for the `axe` binary (spec's external-interfaces CLI
//! surface: an optional source path, `-v`/`--version`, and `-t`/`--test`).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "axe",
    about = "Runs and debugs Axe calculator programs",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Axe source file to run. Omit to start the interactive REPL.
    pub input_path: Option<PathBuf>,

    /// Which stage to exercise on `input_path`.
    #[arg(short = 't', long = "test", value_enum, default_value_t = Stage::Interpreter)]
    pub stage: Stage,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    Lexer,
    Parser,
    Interpreter,
}
