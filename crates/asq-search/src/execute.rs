//! Query execution against a searcher session.
//!
//! The core produces backend queries; this module runs one against an open
//! session and extracts the stored asset fields of the matching documents.

use serde::Serialize;
use tantivy::{
    TantivyDocument,
    collector::TopDocs,
    query::{AllQuery, Query},
    schema::Value,
};

use crate::{error::SearchError, schema::AssetSchema, session::SearcherSession};

/// A query matching every asset document, for queries with no where-clause.
pub fn match_all() -> Box<dyn Query> {
    Box::new(AllQuery)
}

/// One matching asset, with its stored fields.
#[derive(Debug, Clone, Serialize)]
pub struct AssetHit {
    /// The asset's unique id.
    pub id: String,
    /// The asset's name.
    pub name: String,
    /// The asset's serial number, when stored.
    pub serial: String,
    /// The asset's status (indexed form).
    pub status: String,
    /// The asset's assignee (indexed form).
    pub assignee: String,
    /// Relevance score.
    pub score: f32,
}

/// Extracts one stored text field, empty when missing.
fn stored_text(doc: &TantivyDocument, field: tantivy::schema::Field) -> String {
    doc.get_first(field)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

/// Runs a query against a session, returning at most `limit` hits.
pub fn execute_query(
    session: &SearcherSession,
    schema: &AssetSchema,
    query: &dyn Query,
    limit: usize,
) -> Result<Vec<AssetHit>, SearchError> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let searcher = session.searcher();
    let top_docs = searcher
        .search(query, &TopDocs::with_limit(limit))
        .map_err(|e| SearchError::execute(&e))?;

    let mut hits = Vec::with_capacity(top_docs.len());
    for (score, address) in top_docs {
        let doc: TantivyDocument = searcher
            .doc(address)
            .map_err(|e| SearchError::execute(&e))?;

        hits.push(AssetHit {
            id: stored_text(&doc, schema.id),
            name: stored_text(&doc, schema.name),
            serial: stored_text(&doc, schema.serial),
            status: stored_text(&doc, schema.status),
            assignee: stored_text(&doc, schema.assignee),
            score,
        });
    }

    Ok(hits)
}
