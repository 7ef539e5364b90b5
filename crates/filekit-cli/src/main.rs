mod chunks;
mod cli;
mod context;
mod copy;
mod demo;
mod write;

use clap::Parser;
use cli::{Cli, Commands};
use eyre::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    context::init_logging(cli.verbose);

    match &cli.command {
        Commands::Demo(args) => demo::run_demo(args)?,
        Commands::Copy(args) => copy::run_copy(args)?,
        Commands::Chunks(args) => chunks::run_chunks(args)?,
        Commands::Write(args) => {
            if !write::run_write(args)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
