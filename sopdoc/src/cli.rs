//! Command-line interface definitions for sopdoc

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the show command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShowFormat {
    /// Plain text for the terminal
    Text,
    /// Self-contained HTML page
    Html,
}

/// CLI structure for the sopdoc application
#[derive(Parser)]
#[command(name = "sopdoc")]
#[command(version)]
#[command(about = "SOP content engine", long_about = None)]
pub struct Cli {
    /// Directory holding the mutable store and checklist progress
    #[arg(long, default_value = ".sopdoc", global = true)]
    pub store: PathBuf,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for sopdoc
#[derive(Subcommand)]
pub enum Commands {
    /// List tabs in their persisted order
    Tabs,

    /// Render one tab's document
    Show {
        /// Tab id (e.g. "technical")
        tab: String,

        /// Expand every section instead of just the first
        #[arg(long)]
        expand_all: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ShowFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Search every document for a substring
    Search {
        /// Query text
        query: String,
    },

    /// Seed the mutable store from the bundled dataset
    Init {
        /// Wipe an already-initialized store first
        #[arg(short, long)]
        force: bool,
    },

    /// Toggle a checklist item's completion state
    Check {
        /// Checklist item id (e.g. "deploy-ci-green")
        item_id: String,
    },

    /// Write a printable HTML page of a tab's expanded sections
    Export {
        /// Tab id
        tab: String,

        /// Output file path
        #[arg(short, long, default_value = "sop.html")]
        output: PathBuf,
    },
}
