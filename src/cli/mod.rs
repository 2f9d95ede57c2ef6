pub mod commands;

use crate::config::LaunchOverrides;
use crate::core::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bot-launcher",
    version,
    about = "Activate a Python virtual environment and launch the bot inside it",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub options: LaunchOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct LaunchOptions {
    /// Path to launcher.toml (default: searched upward from the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Virtual environment to activate (default: from launcher.toml, or "venv")
    #[arg(long, global = true)]
    pub venv: Option<PathBuf>,

    /// Working directory for the bot (default: project root)
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Activate the environment and run the bot (default)
    Run {
        /// Bot command and arguments (default: from launcher.toml, or "python main.py")
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        worker: Vec<String>,
    },

    /// Verify the environment and bot command without starting the bot
    Check,
}

impl LaunchOptions {
    pub fn overrides(&self, worker: Vec<String>) -> LaunchOverrides {
        LaunchOverrides {
            venv: self.venv.clone(),
            working_dir: self.cwd.clone(),
            worker,
        }
    }
}

/// Dispatches the parsed command line and returns the process exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        None => commands::run::execute(&cli.options, Vec::new()).await,

        Some(Commands::Run { worker }) => commands::run::execute(&cli.options, worker).await,

        Some(Commands::Check) => commands::check::execute(&cli.options).await,
    }
}
