//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use tessera_core::TreePath;

use crate::util::parse_tree_path;

/// Tessera command-line interface for inspecting and editing page layouts
#[derive(Parser)]
#[command(name = "tessera-cli")]
#[command(author, version, about = "Tessera page editor command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the editor settings file
    #[arg(short, long, global = true, env = "TESSERA_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file instead of standard error
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the regions of a page
    #[command(about = "List the regions of a page in sidebar order")]
    Regions {
        /// Page document (.toml or .json)
        page: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// List editable implementations
    #[command(about = "List implementations whose regions can be edited")]
    Editable {
        /// Page document (.toml or .json)
        page: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Move a region onto a sibling's position
    #[command(about = "Reorder two sibling regions")]
    Reorder {
        /// Page document (.toml or .json)
        page: PathBuf,

        /// Region being moved
        #[arg(value_parser = parse_tree_path)]
        from: TreePath,

        /// Region whose position it takes
        #[arg(value_parser = parse_tree_path)]
        to: TreePath,

        /// Write the new order back to the page document
        #[arg(short, long)]
        write: bool,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Replay a scripted editor session
    #[command(about = "Replay pointer and sidebar input against a page")]
    Replay {
        /// Page document (.toml or .json)
        page: PathBuf,

        /// Script file, one step per line
        script: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "table", value_enum)]
        format: OutputFormat,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Display as formatted table
    Table,
    /// Output as JSON
    Json,
}
