//! `envsetup` binary entry point.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use envsetup_cli::cli::{Cli, Command};
use envsetup_cli::commands;
use envsetup_cli::logging::{self, Log, Logger};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let command = args.command.log_name();
    logging::init_subscriber(args.verbose, command);
    let log = Logger::new(command);

    match run(args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli, log: &Logger) -> Result<()> {
    match args.command {
        Command::Link(opts) => commands::link::run(&args.global, &opts, log),
        Command::ImportTime(opts) => commands::import_time::run(&opts, log),
        Command::Completions(opts) => {
            commands::completions::run(&opts);
            Ok(())
        }
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
