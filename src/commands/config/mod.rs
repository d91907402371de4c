use clap::Subcommand;

use crate::shared::config::generate_schema;

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the JSON Schema of ~/.config/jira-tasks/config.yaml (for editor completion)
    Schema,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => println!("{}", schema_json()?),
        }
        Ok(())
    }
}

fn schema_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&generate_schema())
}
