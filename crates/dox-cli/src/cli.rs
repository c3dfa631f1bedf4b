use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `doxymark` binary.
#[derive(Debug, Parser)]
#[command(
    name = "doxymark",
    version,
    about = "Doxymark - C API documentation objects from Doxygen XML"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Configuration file layered over the project and user files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run Doxygen over the configured sources.
    Extract,
    /// Collect documented symbols and print them as JSON.
    Collect(CollectArgs),
    /// List the compounds in a Doxygen XML directory.
    List(ListArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CollectArgs {
    /// Symbols to collect: `name`, `Compound`, or `Compound::member`
    #[arg(required = true)]
    pub identifiers: Vec<String>,

    /// Doxygen XML directory (defaults to `extraction.xml_output`)
    #[arg(long)]
    pub xml_dir: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Doxygen XML directory (defaults to `extraction.xml_output`)
    #[arg(long)]
    pub xml_dir: Option<PathBuf>,
}
