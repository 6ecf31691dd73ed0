//! mmlopt - shortest-text MML re-encoder
//!
//! Reads MML in one game dialect and writes the shortest equivalent MML in
//! the same or another dialect.

use clap::Parser;
use std::process::ExitCode;

use mmlopt_cli::{commands, logger, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logger::init(logger::level_for(cli.verbose, cli.quiet)) {
        eprintln!("{}: {}", colored::Colorize::yellow("warning"), e);
    }

    let result = if cli.list_formats {
        Ok(commands::formats::run())
    } else {
        commands::optimize::run(&cli)
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
