// ABOUTME: Entry point for the promptfolio CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use promptfolio::config::{self, Config};
use promptfolio::error::Result;
use promptfolio::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise --verbose selects debug
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = run(cli.command, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands, output: &Output) -> Result<()> {
    let cwd = env::current_dir()?;

    match command {
        Commands::Init { name, email, force } => {
            config::init_config(&cwd, name.as_deref(), email.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Render { out, login } => {
            let config = Config::discover(&cwd)?;
            commands::render_page(&config, &out, login.as_deref(), output)
        }
        Commands::Login => {
            let config = Config::discover(&cwd)?;
            commands::login(&config, output)
        }
        Commands::Callback { code, state } => {
            let config = Config::discover(&cwd)?;
            commands::callback(config, &code, &state, Output::new(output.mode())).await
        }
        Commands::Deploy { token_env } => {
            let config = Config::discover(&cwd)?;
            commands::deploy_with_token(config, &token_env, Output::new(output.mode())).await
        }
        Commands::Status { login } => {
            let config = Config::discover(&cwd)?;
            commands::status(&config, &login, output)
        }
    }
}
