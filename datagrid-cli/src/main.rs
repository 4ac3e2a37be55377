//! datagrid command-line front end.

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod paths;

use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let settings = Settings::load(cli.config.as_deref())?;

    let base = settings.log.level_filter()?.unwrap_or(LevelFilter::Warn);
    let log_file = cli.log_file.as_deref().or(settings.log.file.as_deref());
    logging::init(logging::level_for(cli.verbose, base), log_file)?;

    match &cli.command {
        Command::Table(args) => commands::table::run(args, &settings.table),
        Command::Query(args) => commands::query::run(args),
    }
}
