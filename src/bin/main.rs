use std::path::Path;

use clap::Parser;
use color_eyre::Result;
use env_logger::Target;
use forge::{cli::input::CliArgs, utils::logger::config_logger, worker::run_forge};

/// The entry point for the binary generated
/// for the program
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli_args = CliArgs::parse();
    config_logger(cli_args.verbose, Target::Stdout)?;
    log::info!("Launching a new forge program");
    run_forge(&cli_args, Path::new("."))?;
    log::info!("Tasks successfully finished");

    Ok(())
}
