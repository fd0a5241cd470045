//! # Agenda - inline task annotations as a ranked agenda
//!
//! Scans every text file in a workspace for lines tagged `@TODO`, `@WAIT` or
//! `@DONE`, ranks them by status and priority (`@P0`, `@P1`, `@P2`) and shows
//! them in a terminal table with links back to the source line.
//!
//! ## Annotations
//!
//! ```text
//! Ship the release notes @TODO @P1
//!   [ ] changelog
//!   [x] version bump
//!
//! Waiting on legal review @WAIT
//! ```
//!
//! A line becomes a task when it carries a status tag. Checkbox lines (`[ ]`,
//! `[-]`, `[x]`) directly below it, blank lines allowed in between, are its
//! subtasks.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive agenda for the current directory
//! agenda
//!
//! # Plain listing with subtasks
//! agenda list --subtasks
//!
//! # HTML page with links to every task
//! agenda export --format html
//! ```
//!
//! Settings live in an optional `.agenda.toml` in the workspace root.
//! Set `RUST_LOG=debug` (with `--log-file` for the interactive view) to trace a scan.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod agenda;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fields;
pub mod location;
pub mod render;
pub mod scan;
pub mod tag;
pub mod task;
pub mod workspace;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use config::Config;
use workspace::Workspace;

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins; otherwise warnings are shown, except in the interactive view
/// without a log file, where stderr output would tear the screen.
fn init_logging(log_file: Option<&Path>, interactive: bool) -> std::io::Result<()> {
    let default_directive = if interactive && log_file.is_none() { "off" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Ui);

    let interactive = matches!(command, Commands::Ui);
    if let Err(e) = init_logging(cli.log_file.as_deref(), interactive) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    // Handle commands that don't need a workspace first
    if let Commands::Completions { shell } = command {
        cmd_completions(shell);
        return;
    }

    let mut config = match Config::load(cli.config.as_deref(), &cli.root) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    config.apply_overrides(cli.rank, cli.skip_unreadable);

    if let Commands::Open { location } = &command {
        cmd_open(&config, location);
        return;
    }

    let workspace = match Workspace::new(&cli.root, config) {
        Ok(workspace) => workspace,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match command {
        Commands::Ui => cmd_ui(workspace),

        Commands::List { subtasks, status, priority, limit } =>
            cmd_list(&workspace, subtasks, status, priority, limit),

        Commands::Export { format, output, hide_subtasks } =>
            cmd_export(&workspace, format, output, hide_subtasks),

        Commands::Open { .. } => unreachable!("Open command handled above"),
        Commands::Completions { .. } => unreachable!("Completions command handled above"),
    }
}
