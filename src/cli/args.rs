//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `build`: Build the registry and write the module and manifest artifacts
//! - `check`: Verify the artifacts on disk match a fresh build
//! - `init`: Initialize a registry configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "registry", author, version, about, long_about = None)]
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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by `build` and `check`.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project directory to start the config search from (default: current directory)
    #[arg(short = 'C', long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Treat registry dependencies without a matching item as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct BuildCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Build and report without writing any artifact
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the registry module and JSON manifest
    Build(BuildCommand),
    /// Check that the registry artifacts on disk are up to date
    Check(CheckCommand),
    /// Initialize a new .registryrc.json configuration file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let args = Arguments::parse_from(["registry", "build", "-C", "site", "--strict", "--dry-run"]);
        match args.command {
            Some(Command::Build(cmd)) => {
                assert_eq!(cmd.common.root, Some(PathBuf::from("site")));
                assert!(cmd.common.strict);
                assert!(cmd.dry_run);
                assert!(!cmd.common.verbose);
            }
            other => panic!("expected build, got {:?}", other),
        }
    }

    #[test]
    fn test_verbose_flag() {
        let args = Arguments::parse_from(["registry", "check", "-v"]);
        assert!(args.verbose());

        let args = Arguments::parse_from(["registry", "init"]);
        assert!(!args.verbose());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Arguments::command().debug_assert();
    }
}
