//! CLI argument parsing.
//!
//! With no subcommand the interactive menu runs; the other commands expose
//! single catalog and flow operations for scripting.
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "flowmaker",
    version,
    about = "Build, replay, and catalog interactive step flows",
    after_help = "Commands:\n  menu                 Interactive menu (default)\n  list [--json]        List saved flows\n  run <NAME>           Load a saved flow and execute it\n  show <NAME>          Print a saved flow's steps without running it\n  sample [<N>]         Run predefined flow N, or list the predefined flows\n  delete <NAME>        Remove every saved flow named NAME\n\nExamples:\n  flowmaker\n  flowmaker --catalog /tmp/flows.csv list --json\n  flowmaker run Budget\n  flowmaker -vv sample 3"
)]
pub struct RootArgs {
    /// JSON config file (overrides FLOWMAKER_CONFIG and the per-user config)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (overrides the config file and FLOWMAKER_CATALOG)
    #[arg(long, value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu
    Menu,
    /// List saved flows
    List(ListArgs),
    /// Load a saved flow by name and execute it
    Run(NameArgs),
    /// Print a saved flow's step listing and static replay
    Show(NameArgs),
    /// Run a predefined flow, or list them when no number is given
    Sample(SampleArgs),
    /// Delete every saved flow with the given name
    Delete(NameArgs),
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct NameArgs {
    /// Flow name as stored in the catalog
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct SampleArgs {
    /// Predefined flow number
    #[arg(value_name = "N")]
    pub number: Option<usize>,
}

impl RootArgs {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }

    /// Default log filter for the verbosity count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
