//! Implementation of `asq search`.

use std::process::ExitCode;

use asq_query::{SortDirection, SortField};
use asq_search::{
    AssetHit, RequestContext, SearcherSession, SessionSlot, execute_query, match_all,
};

use super::{parse_or_report, print_messages};
use crate::cli::context::CommandContext;

/// Searches the asset index and prints matching assets.
pub fn run(
    ctx: &CommandContext,
    query: &str,
    limit: Option<usize>,
    user: Option<&str>,
    json: bool,
) -> ExitCode {
    let parsed = match parse_or_report(query) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };

    let request = match user {
        Some(name) => RequestContext::for_user(name),
        None => RequestContext::new(),
    };

    let result = run_search(ctx, &request, &parsed, limit);
    // The request scope must close on every exit path, errors included.
    request.close();

    let hits = match result {
        Ok(hits) => hits,
        Err(code) => return code,
    };

    if json {
        match serde_json::to_string_pretty(&hits) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("error: could not render hits: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    if hits.is_empty() {
        println!("No matching assets.");
        return ExitCode::SUCCESS;
    }

    for hit in &hits {
        println!("{}  {}", hit.id, hit.name);
    }

    ExitCode::SUCCESS
}

/// Validates, builds, and executes the query within one request scope.
fn run_search(
    ctx: &CommandContext,
    request: &RequestContext,
    parsed: &asq_query::Query,
    limit: Option<usize>,
) -> Result<Vec<AssetHit>, ExitCode> {
    let backend = match &parsed.where_clause {
        Some(clause) => {
            let messages = ctx.registry.validate(request, clause);
            if !messages.is_empty() {
                print_messages(&messages);
            }
            if messages.has_errors() {
                return Err(ExitCode::FAILURE);
            }
            ctx.registry.build(request, clause).map_err(|e| {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            })?
        }
        None => match_all(),
    };

    let index_dir = ctx.index_dir().map_err(|message| {
        eprintln!("error: {message}");
        ExitCode::FAILURE
    })?;

    let session = request
        .searchers()
        .retrieve(SessionSlot::Assets, || {
            SearcherSession::open_at(&index_dir)
        })
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;

    let limit = limit.unwrap_or(ctx.config.search.default_limit);
    let mut hits = execute_query(&session, &ctx.schema, backend.as_ref(), limit).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })?;

    sort_hits(&mut hits, &effective_order(ctx, parsed));
    Ok(hits)
}

/// The explicit ordering, or the configured default when the query carries
/// none.
fn effective_order(ctx: &CommandContext, parsed: &asq_query::Query) -> Vec<SortField> {
    if !parsed.order_by.is_empty() {
        return parsed.order_by.fields.clone();
    }
    match &ctx.config.search.default_order_by {
        Some(field) => vec![SortField::new(field.clone(), SortDirection::Ascending)],
        None => Vec::new(),
    }
}

/// Maps a sort field name to an accessor over stored hit fields.
fn sort_selector(key: &str) -> Option<fn(&AssetHit) -> &str> {
    match key {
        "id" => Some(|hit| hit.id.as_str()),
        "name" => Some(|hit| hit.name.as_str()),
        "serial" => Some(|hit| hit.serial.as_str()),
        "status" => Some(|hit| hit.status.as_str()),
        "assignee" => Some(|hit| hit.assignee.as_str()),
        _ => None,
    }
}

/// Sorts hits by the stored fields named in the ordering. Fields that are
/// not stored on hits (or unknown) leave relevance order untouched.
fn sort_hits(hits: &mut [AssetHit], order: &[SortField]) {
    // Later sort fields are secondary keys: stable sorts applied in
    // reverse give the first field the final say.
    for sort in order.iter().rev() {
        let Some(select) = sort_selector(&sort.field.to_lowercase()) else {
            continue;
        };
        if sort.direction == SortDirection::Descending {
            hits.sort_by(|a, b| select(b).cmp(select(a)));
        } else {
            hits.sort_by(|a, b| select(a).cmp(select(b)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, name: &str) -> AssetHit {
        AssetHit {
            id: id.to_string(),
            name: name.to_string(),
            serial: String::new(),
            status: String::new(),
            assignee: String::new(),
            score: 1.0,
        }
    }

    #[test]
    fn sorts_by_named_field() {
        let mut hits = vec![hit("2", "b"), hit("1", "a")];
        sort_hits(
            &mut hits,
            &[SortField::new("name", SortDirection::Ascending)],
        );
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn descending_reverses() {
        let mut hits = vec![hit("1", "a"), hit("2", "b")];
        sort_hits(
            &mut hits,
            &[SortField::new("name", SortDirection::Descending)],
        );
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn unknown_sort_field_keeps_order() {
        let mut hits = vec![hit("2", "b"), hit("1", "a")];
        sort_hits(
            &mut hits,
            &[SortField::new("created", SortDirection::Ascending)],
        );
        assert_eq!(hits[0].id, "2");
    }
}
