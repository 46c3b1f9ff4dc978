use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use docdelta_compare::CompareError;

mod cli;
mod commands;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    match commands::run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let too_large = e
                .downcast_ref::<CompareError>()
                .is_some_and(CompareError::is_resource_limit);
            eprintln!("{} {:#}", "error:".red().bold(), e);
            if too_large {
                eprintln!("  split the document into smaller parts and compare them separately");
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
