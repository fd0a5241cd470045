use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::RankPolicy;

/// Ranked agenda of the @TODO/@WAIT/@DONE annotations in a workspace.
/// Runs the interactive view when no subcommand is given.
#[derive(Parser)]
#[command(name = "agenda", version, about = "Inline task annotations as a ranked agenda")]
pub struct Cli {
    /// Workspace root to scan.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file (defaults to <root>/.agenda.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// How tasks are ranked.
    #[arg(long, global = true, value_enum)]
    pub rank: Option<RankPolicy>,

    /// Skip files that cannot be read instead of aborting.
    #[arg(long, global = true)]
    pub skip_unreadable: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
