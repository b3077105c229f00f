//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

pub mod completions;
pub mod generate;

/// Generate typed C# GitHub API clients from an OpenAPI schema.
///
/// By default the generated source is printed to stdout. Pass `--write`
/// to write one file per resource instead.
#[derive(Debug, Parser)]
#[command(name = "octogen", version)]
pub struct Cli {
    /// Write generated files to disk instead of printing them.
    #[arg(long)]
    pub write: bool,

    /// OpenAPI schema to read [default: schema/api.github.com.json].
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Config file [default: octogen.toml if present].
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root directory for written files.
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Only print generated source, warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print shell completions and exit.
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
