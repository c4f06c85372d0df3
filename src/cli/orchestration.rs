//! Command dispatch
//!
//! Keeps clap out of the release logic: parsed arguments are turned into
//! [ReleaseOptions] and a configured [Orchestrator] here.

use std::path::Path;

use anyhow::{anyhow, Result};

use super::{BuildInfo, Cli};
use crate::config::load_config;
use crate::external::SystemRunner;
use crate::logging;
use crate::release::{Orchestrator, ReleaseOptions, ReleaseReport};
use crate::ui::Reporter;

/// Run the parsed command line from the current directory
pub fn dispatch(cli: Cli, build: &BuildInfo) -> Result<()> {
    let Some(kind) = cli.command.bump_kind() else {
        println!("{}", build.describe());
        return Ok(());
    };

    let options = cli.flags.release_options(kind);
    let project_dir = std::env::current_dir()
        .map_err(|e| anyhow!("could not determine the current directory: {}", e))?;
    run_release(&options, cli.flags.config.as_deref(), &project_dir)?;
    Ok(())
}

/// Release workflow for a project directory with real external commands
pub fn run_release(
    options: &ReleaseOptions,
    config_path: Option<&Path>,
    project_dir: &Path,
) -> Result<ReleaseReport> {
    options.validate()?;
    logging::init(options.verbose);

    let config = load_config(config_path, project_dir)?;
    let runner = SystemRunner::new(options.verbose).in_dir(project_dir);
    let reporter = Reporter::new(options.quiet, options.verbose);
    let orchestrator = Orchestrator::new(&runner, config, reporter, project_dir);

    let report = orchestrator.execute(options)?;
    Ok(report)
}
