use clap::Parser;

use bumpr::cli::{orchestration, BuildInfo, Cli};
use bumpr::ui;

fn main() {
    let cli = Cli::parse();
    let build = BuildInfo::current();

    if let Err(e) = orchestration::dispatch(cli, &build) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}
