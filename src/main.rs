//! SPECTRAPRO CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, dispatch to
//! single-file or batch processing, and exit with appropriate status after
//! printing a user-facing message for any failure.
//! For programmatic use, prefer the library API (`spectrapro::api`).

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> ExitCode {
    let args = cli::CliArgs::parse();
    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", cli::user_message(&e));
            ExitCode::FAILURE
        }
    }
}
