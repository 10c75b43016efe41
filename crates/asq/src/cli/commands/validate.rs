//! Implementation of `asq validate`.

use std::process::ExitCode;

use asq_search::RequestContext;

use super::{parse_or_report, print_messages};
use crate::cli::context::CommandContext;

/// Validates a query against the registry and prints the messages.
pub fn run(ctx: &CommandContext, query: &str, user: Option<&str>, json: bool) -> ExitCode {
    let parsed = match parse_or_report(query) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    let Some(clause) = &parsed.where_clause else {
        println!("Nothing to validate.");
        return ExitCode::SUCCESS;
    };

    let request = match user {
        Some(name) => RequestContext::for_user(name),
        None => RequestContext::new(),
    };
    let messages = ctx.registry.validate(&request, clause);
    request.close();

    if json {
        match serde_json::to_string_pretty(&messages) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("error: could not render messages: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else if messages.is_empty() {
        println!("Query is valid.");
    } else {
        print_messages(&messages);
    }

    if messages.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
