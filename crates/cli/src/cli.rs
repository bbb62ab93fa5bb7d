//! Command-line arguments

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Model relational schemas and derive MySQL DDL
#[derive(Parser, Debug)]
#[command(name = "erd-builder")]
#[command(version, about = "Model relational schemas and derive MySQL DDL")]
pub struct Cli {
    /// Configuration file (defaults to ./erd.toml when present)
    #[arg(long, global = true, value_name = "FILE", env = "ERD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands. Every command reading a schema falls back to the built-in
/// sample when `--input` is omitted.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the DDL for a schema, or write it to a file
    Generate {
        /// Schema snapshot to read
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Write the DDL to this file instead of stdout
        #[arg(short, long, value_name = "FILE", conflicts_with = "write")]
        output: Option<PathBuf>,

        /// Write the DDL to the configured output file
        #[arg(short, long)]
        write: bool,

        /// Leave column comments out
        #[arg(long)]
        no_comments: bool,
    },

    /// Print the sample schema snapshot, or write it to a file
    Sample {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Report problems such as duplicate names or dangling foreign keys
    Validate {
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Exit with an error when any problem is found
        #[arg(long)]
        strict: bool,
    },

    /// Summarize entities, columns and relations
    Info {
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Print connector paths and cardinality markers as SVG path data
    Geometry {
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },
}
