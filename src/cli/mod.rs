//! Command-line interface
//!
//! clap argument model plus [orchestration::dispatch], which turns parsed
//! arguments into a release run.

pub mod orchestration;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::BumpKind;
use crate::release::ReleaseOptions;

/// Build metadata, created once in `main` and handed to the command layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: String,
    pub build_time: String,
}

impl BuildInfo {
    /// Metadata of the running binary. The build time comes from the
    /// `BUMPR_BUILD_TIME` environment variable at compile time.
    pub fn current() -> Self {
        BuildInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            build_time: option_env!("BUMPR_BUILD_TIME")
                .unwrap_or("unknown")
                .to_string(),
        }
    }

    pub fn describe(&self) -> String {
        format!("bumpr version {} (built at {})", self.version, self.build_time)
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bumpr",
    about = "Bump the project version, tag it and publish a release"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub flags: GlobalFlags,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct GlobalFlags {
    #[arg(short = 'n', long, global = true, help = "Show the commands without running them")]
    pub dry_run: bool,

    #[arg(
        short,
        long,
        global = true,
        value_name = "PATH",
        help = "Version file to use instead of auto-detection"
    )]
    pub source: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Show every command that runs")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Do not push commits, tags or releases")]
    pub no_push: bool,

    #[arg(long, global = true, help = "Do not commit the version change")]
    pub no_commit: bool,

    #[arg(short, long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Skip pre-flight checks")]
    pub force: bool,

    #[arg(
        short,
        long,
        global = true,
        value_name = "PATH",
        help = "Custom configuration file path"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Release the next patch version
    Patch,
    /// Release the next minor version
    Minor,
    /// Release the next major version
    Major,
    /// Recreate the tag and release for the current version
    Republish,
    /// Print version information
    Version,
}

impl Commands {
    /// Bump kind for release subcommands; `None` for `version`
    pub fn bump_kind(&self) -> Option<BumpKind> {
        match self {
            Commands::Patch => Some(BumpKind::Patch),
            Commands::Minor => Some(BumpKind::Minor),
            Commands::Major => Some(BumpKind::Major),
            Commands::Republish => Some(BumpKind::Republish),
            Commands::Version => None,
        }
    }
}

impl GlobalFlags {
    pub fn release_options(&self, kind: BumpKind) -> ReleaseOptions {
        ReleaseOptions {
            kind,
            source: self.source.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            skip_push: self.no_push,
            skip_commit: self.no_commit,
            quiet: self.quiet,
            force: self.force,
        }
    }
}
