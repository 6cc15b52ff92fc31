//! MechTrack CLI Module
//! Command-line interface for inspecting access decisions

pub mod formatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mechtrack-access")]
#[command(author = "MechTrack Team")]
#[command(version)]
#[command(about = "Role and position based access resolution for mechanics activity tracking", long_about = None)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Output format (json for scripting)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Log every access decision
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default config and route table
    Init {
        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Decide access for a role and position against allow-lists
    Check {
        /// Account role as stored in the session
        #[arg(short, long)]
        role: String,

        /// Job position as stored in the session
        #[arg(long)]
        posisi: String,

        /// Allowed roles, comma separated (omit for no role restriction)
        #[arg(long, value_delimiter = ',')]
        roles: Option<Vec<String>>,

        /// Allowed positions, comma separated (omit for no position restriction)
        #[arg(long, value_delimiter = ',')]
        positions: Option<Vec<String>>,
    },

    /// Show what a position is treated as
    Resolve {
        /// Position to resolve
        posisi: String,
    },

    /// List the position equivalence table
    Equivalents,

    /// Show whether a role and position may only view
    ReadOnly {
        #[arg(short, long)]
        role: String,

        #[arg(long)]
        posisi: String,
    },

    /// Evaluate a route against the project's route table
    Guard {
        /// Route path, e.g. /activities/new
        path: String,

        #[arg(short, long)]
        role: String,

        #[arg(long)]
        posisi: String,
    },

    /// List the project's route table
    Routes,
}

impl Cli {
    pub fn get_project_dir(&self) -> PathBuf {
        self.project
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}
