//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Employee attendance tracker.
///
/// Records enter/exit/leave events per employee per day against a
/// document store and exports the records to CSV. The command surface
/// is an interactive numbered menu; there are no subcommands.
#[derive(Debug, Parser)]
#[command(name = "attend", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
