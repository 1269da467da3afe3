// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "promptfolio")]
#[command(about = "Generate a portfolio site and publish it to GitHub Pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Output JSON lines for scripting
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a promptfolio.yml configuration file
    Init {
        /// Your full name
        #[arg(long)]
        name: Option<String>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Render the portfolio page locally
    Render {
        /// Where to write the page
        #[arg(short, long, default_value = "index.html")]
        out: PathBuf,

        /// GitHub login shown on the page
        #[arg(long)]
        login: Option<String>,
    },

    /// Start GitHub authorization and print the URL to visit
    Login,

    /// Finish GitHub authorization and deploy
    Callback {
        /// `code` query parameter from the redirect
        #[arg(long)]
        code: String,

        /// `state` query parameter from the redirect
        #[arg(long)]
        state: String,
    },

    /// Deploy with an existing GitHub token
    Deploy {
        /// Environment variable holding the token
        #[arg(long, default_value = "GITHUB_TOKEN")]
        token_env: String,
    },

    /// Show the repository and site URLs for the configured profile
    Status {
        /// GitHub login that will own the repository
        #[arg(long)]
        login: String,
    },
}
