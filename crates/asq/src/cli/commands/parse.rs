//! Implementation of `asq parse`.

use std::process::ExitCode;

use asq_query::normalize;

use super::parse_or_report;

/// Parses a query and prints its clause tree.
pub fn run(query: &str, show_normalized: bool) -> ExitCode {
    let parsed = match parse_or_report(query) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    println!("Query:");
    println!("  {parsed}");
    println!();

    match &parsed.where_clause {
        Some(clause) => {
            println!("Clause tree:");
            for line in clause.to_string().lines() {
                println!("  {line}");
            }
        }
        None => println!("Clause tree: (none)"),
    }

    if !parsed.order_by.is_empty() {
        println!();
        println!("{}", parsed.order_by);
    }

    if show_normalized && let Some(clause) = &parsed.where_clause {
        let simplified = normalize(clause);
        println!();
        println!("Normalized:");
        for line in simplified.to_string().lines() {
            println!("  {line}");
        }
    }

    ExitCode::SUCCESS
}
