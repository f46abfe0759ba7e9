// CLI module for argument parsing and configuration

use crate::domain::{ActionOptions, ConflictPolicy};
use clap::{ArgAction, Parser};

/// Imgsort - sort images into a directory one keystroke at a time
///
/// Asks for a source and a target directory, shows each image of the source
/// directory and waits for a key: m moves it into the target, c copies it,
/// s leaves it alone. Then asks for the next pair of directories.
#[derive(Parser, Debug, Clone)]
#[command(name = "imgsort")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dry run mode - report each action without moving or copying anything
    #[arg(short = 'n', long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Replace files that already exist in the target directory
    ///
    /// Without this flag, moving or copying onto an existing file is an error.
    #[arg(long = "overwrite", action = ArgAction::SetTrue)]
    pub overwrite: bool,

    /// Increase log verbosity (-v info, -vv debug)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub dry_run: bool,
    pub conflict: ConflictPolicy,
    pub verbose: u8,
}

impl AppConfig {
    /// Options handed to every executed action
    pub fn action_options(&self) -> ActionOptions {
        ActionOptions {
            conflict: self.conflict,
            dry_run: self.dry_run,
        }
    }

    /// Default log filter when RUST_LOG is not set
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            dry_run: args.dry_run,
            conflict: if args.overwrite {
                ConflictPolicy::Overwrite
            } else {
                ConflictPolicy::Fail
            },
            verbose: args.verbose,
        }
    }
}
