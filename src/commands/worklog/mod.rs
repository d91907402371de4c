mod error;
mod import;

use clap::Subcommand;

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum WorklogCommands {
    /// Add work-log entries from a CSV file with `Key` and `Time Spent` (seconds) columns
    Import(import::ImportArgs),
}

impl WorklogCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Import(args) => import::run(args),
        }
    }
}
