//! Implementations of the `asq` subcommands.

mod explain;
mod parse;
mod search;
mod validate;

use std::process::ExitCode;

use asq_query::{ParseError, Query, parse_query};
use asq_search::{MessageSet, Severity};

use crate::cli::{args::Commands, context::CommandContext};

/// Dispatches a parsed command line to its implementation.
pub fn run(ctx: &CommandContext, command: &Commands) -> ExitCode {
    match command {
        Commands::Parse { query, normalize } => parse::run(query, *normalize),
        Commands::Validate { query, user, json } => {
            validate::run(ctx, query, user.user.as_deref(), *json)
        }
        Commands::Explain { query, user } => explain::run(ctx, query, user.user.as_deref()),
        Commands::Search {
            query,
            limit,
            user,
            json,
        } => search::run(ctx, query, *limit, user.user.as_deref(), *json),
    }
}

/// Parses query text, printing a positioned error on failure.
fn parse_or_report(text: &str) -> Result<Query, ExitCode> {
    parse_query(text).map_err(|err| {
        report_parse_error(&err);
        ExitCode::FAILURE
    })
}

/// Prints a parse error with its message key and position.
fn report_parse_error(err: &ParseError) {
    eprintln!("error [{}]: {err}", err.message_key());
}

/// Prints validation messages, one per line with its severity.
fn print_messages(messages: &MessageSet) {
    for message in messages.messages() {
        let severity = match message.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!("{severity} [{}]: {message}", message.key);
    }
}
