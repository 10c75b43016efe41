//! Implementation of `asq explain`.

use std::process::ExitCode;

use asq_query::normalize;
use asq_search::RequestContext;

use super::{parse_or_report, print_messages};
use crate::cli::context::CommandContext;

/// Shows the parsed tree, the normalized tree, and the backend query a
/// valid query compiles to, without executing a search.
pub fn run(ctx: &CommandContext, query: &str, user: Option<&str>) -> ExitCode {
    let parsed = match parse_or_report(query) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    let Some(clause) = &parsed.where_clause else {
        println!("Query has no where-clause; it matches every asset.");
        return ExitCode::SUCCESS;
    };

    println!("Parsed:");
    println!("  {}", clause.to_query_string());

    let simplified = normalize(clause);
    println!("Normalized:");
    println!("  {}", simplified.to_query_string());
    println!();

    let request = match user {
        Some(name) => RequestContext::for_user(name),
        None => RequestContext::new(),
    };

    let messages = ctx.registry.validate(&request, clause);
    if !messages.is_empty() {
        print_messages(&messages);
    }
    if messages.has_errors() {
        request.close();
        return ExitCode::FAILURE;
    }

    let result = ctx.registry.build(&request, &simplified);
    request.close();

    match result {
        Ok(backend) => {
            println!("Backend query:");
            println!("  {backend:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
