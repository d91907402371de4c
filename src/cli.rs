use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::config::ConfigCommands;
use crate::commands::issues::{ListArgs, ViewArgs};
use crate::commands::worklog::WorklogCommands;

#[derive(Parser)]
#[command(
    name = "jira-tasks",
    bin_name = "jt",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse your open issues interactively
    View(ViewArgs),

    /// Print your open issues as a table
    List(ListArgs),

    /// Work-log tools
    #[command(subcommand)]
    Worklog(WorklogCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
