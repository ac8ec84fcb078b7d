mod cli;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::args::{Cli, Commands, ConfigAction};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    // Loaded per command so `config init` works even when the current config is unreadable.
    let load_settings = || cli::commands::load_settings(&cli.runtime);

    match &cli.command {
        Some(Commands::Solve { prompt }) => {
            let prompt = if !prompt.is_empty() { Some(prompt.join(" ")) } else { None };
            cli::commands::handle_solve(&load_settings()?, prompt, &cli.runtime, &cli.io).await?
        }
        Some(Commands::Interactive) => {
            cli::commands::handle_interactive(&load_settings()?, &cli.runtime).await?
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force, scope } => {
                cli::commands::handle_config_init(*force, scope.as_deref())?
            }
            ConfigAction::List => cli::commands::handle_config_list(&load_settings()?)?,
            ConfigAction::Set { key, value } => {
                let mut settings = load_settings()?;
                cli::commands::handle_config_set(&mut settings, &cli.runtime, key, value)?
            }
        },
        None => {
            if !cli.prompt.is_empty() || cli.io.input_file.is_some() {
                let prompt = Some(cli.prompt.join(" "));
                cli::commands::handle_solve(&load_settings()?, prompt, &cli.runtime, &cli.io).await?
            } else {
                // No command and no prompt: show help
                Cli::command().print_help()?;
                println!();
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
