use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CompareConfig;

#[derive(Parser)]
#[command(
    name = "rembrandt",
    about = "Visual regression checks for screenshots and rendered images"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create .rembrandt/config.toml with commented defaults
    Init {
        /// Overwrite existing config and gitignore
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Compare two images and report the verdict (exit 0/1)
    Compare {
        /// Reference image
        reference: PathBuf,
        /// Candidate image
        candidate: PathBuf,
        /// Write the green/red composition PNG here
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        compare: CompareConfig,
    },

    /// Compare every snapshot in current/ against reference/ (exit 0/1)
    Test {
        /// Only compare snapshots whose name contains PATTERN (case-insensitive)
        #[arg(long, short = 'f')]
        filter: Option<String>,
        /// Number of comparisons to run concurrently
        #[arg(long, short = 'p')]
        parallel: Option<usize>,
        #[command(flatten)]
        compare: CompareConfig,
    },

    /// Promote current/ snapshots to reference/
    Approve {
        /// Only approve snapshots whose name contains PATTERN (case-insensitive)
        #[arg(long, short = 'f')]
        filter: Option<String>,
        /// Only approve new snapshots (no prior reference)
        #[arg(long)]
        new: bool,
        /// Only approve failed snapshots (have a difference image)
        #[arg(long)]
        failed: bool,
        /// Approve all pending snapshots (default when no kind flags)
        #[arg(long)]
        all: bool,
    },

    /// Generate a visual review report (static HTML)
    Review {
        /// Open the report in the default browser
        #[arg(long)]
        open: bool,
    },
}
