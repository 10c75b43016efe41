//! Command-line interface for the `asq` asset search tool.

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{args::Cli, commands, context::CommandContext};

mod cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let ctx = match CommandContext::new() {
        Ok(ctx) => ctx,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    commands::run(&ctx, &cli.command)
}
