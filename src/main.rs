mod cli;
mod commands;
mod infra;
mod shared;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};

use shared::logging::{self, LogTarget};

fn main() -> anyhow::Result<()> {
    let Cli { command } = Cli::parse();

    let dotenv_path = shared::env_var::load_dotenv();

    // The viewer owns the terminal; its logs go to a file.
    let target = match command {
        Commands::View(_) => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let _guard = logging::init(target);
    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    match command {
        Commands::View(args) => commands::issues::run_view(&args)?,
        Commands::List(args) => commands::issues::run_list(&args)?,
        Commands::Worklog(worklog_cmd) => worklog_cmd.run()?,
        Commands::Config(config_cmd) => config_cmd.run()?,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "jt", &mut std::io::stdout());
        }
    }

    Ok(())
}
