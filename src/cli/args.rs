//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract the API model of a component directory as JSON
//! - `init`: Initialize propdoc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Component directory to extract
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Write the JSON model to this file instead of stdout (overrides config file)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Render Markdown summaries for props and methods
    #[arg(long)]
    pub md: bool,

    /// JSON file mapping component names to parent components (overrides config file)
    #[arg(long)]
    pub parents: Option<PathBuf>,

    /// Paths or glob patterns to skip, relative to the directory
    /// Can be specified multiple times: --ignore demo --ignore "**/__tests__/**"
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Report files that fail to parse and continue with the rest
    #[arg(short, long)]
    pub keep_going: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract props, methods and sub-components of a component directory
    Extract(ExtractCommand),
    /// Initialize a new .propdocrc.json configuration file
    Init,
}
