//! Command line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Maps simulation output variables to the input object types that can
/// emit them, by mining the artifacts of completed test runs.
#[derive(Parser, Debug)]
#[command(name = "ovmap")]
#[command(about = "Map output variables to input object types")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every run under a build tree and write both map documents
    Map {
        /// Build directory containing a testfiles/ tree of completed runs
        build_dir: PathBuf,

        /// Directory the map documents are written into
        #[arg(short, long, default_value = "_build")]
        output: PathBuf,

        /// Process runs one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
    /// Classify a single run directory and print the result
    Classify {
        /// Run directory holding the variable listing and input document
        run_dir: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "terminal")]
        format: OutputFormat,
    },
}

/// Output format for single-run classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Terminal,
    /// Pretty-printed JSON
    Json,
}
