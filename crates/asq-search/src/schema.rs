//! Index schema definitions for the asq search index.
//!
//! Two document types share the index directory, each with its own schema:
//! asset documents (the catalog records queries run against) and change
//! documents (the per-field change log behind history operators).
//!
//! Entity-valued fields (status, manufacturer, catalog, assignee) index the
//! sentinel [`EMPTY_SENTINEL`] when a record carries no value, so emptiness
//! is a term query like any other. The document-writing side owns that
//! contract; this crate only reads it.

use tantivy::schema::{
    FAST, Field, INDEXED, IndexRecordOption, STORED, STRING, Schema, TextFieldIndexing,
    TextOptions,
};

/// Term indexed in entity fields when a record has no value for them.
pub const EMPTY_SENTINEL: &str = "\u{0}empty\u{0}";

/// Handles to all fields of the asset document schema.
#[derive(Debug, Clone)]
pub struct AssetSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Unique asset identifier (stored, exact lookup only).
    pub id: Field,
    /// Asset name (tokenized text, stored).
    pub name: Field,
    /// Free-text description (tokenized text, stored).
    pub description: Field,
    /// Serial number (single token, stored).
    pub serial: Field,
    /// Status id (single token, stored, fast).
    pub status: Field,
    /// Manufacturer id (single token, stored, fast).
    pub manufacturer: Field,
    /// Catalog id (single token, stored, fast).
    pub catalog: Field,
    /// Assigned user id (single token, stored, fast).
    pub assignee: Field,
    /// Creation time as epoch seconds (indexed, stored, fast).
    pub created: Field,
}

impl AssetSchema {
    /// Creates the asset schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let id = builder.add_text_field("id", STRING | STORED);

        let text_options = TextOptions::default()
            .set_indexing_options(
                TextFieldIndexing::default()
                    .set_index_option(IndexRecordOption::WithFreqsAndPositions),
            )
            .set_stored();
        let name = builder.add_text_field("name", text_options.clone());
        let description = builder.add_text_field("description", text_options);

        let serial = builder.add_text_field("serial", STRING | STORED);

        // Entity fields: one token per value, fast for filtering.
        let status = builder.add_text_field("status", STRING | STORED | FAST);
        let manufacturer = builder.add_text_field("manufacturer", STRING | STORED | FAST);
        let catalog = builder.add_text_field("catalog", STRING | STORED | FAST);
        let assignee = builder.add_text_field("assignee", STRING | STORED | FAST);

        let created = builder.add_i64_field("created", INDEXED | STORED | FAST);

        let schema = builder.build();

        Self {
            schema,
            id,
            name,
            description,
            serial,
            status,
            manufacturer,
            catalog,
            assignee,
            created,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Resolves an index key to its field handle.
    pub fn field(&self, index_field: &str) -> Option<Field> {
        self.schema.get_field(index_field).ok()
    }

    /// The tokenized text fields a cross-field text clause searches.
    pub fn text_fields(&self) -> [Field; 2] {
        [self.name, self.description]
    }
}

impl Default for AssetSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles to all fields of the change document schema.
#[derive(Debug, Clone)]
pub struct ChangeSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// The asset the change belongs to.
    pub asset_id: Field,
    /// The changed field's name (single token).
    pub field: Field,
    /// The value before the change (single token).
    pub from_value: Field,
    /// The value after the change (single token).
    pub to_value: Field,
    /// The user who made the change (single token).
    pub author: Field,
    /// When the change happened, epoch seconds (indexed, fast).
    pub at: Field,
}

impl ChangeSchema {
    /// Creates the change schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let asset_id = builder.add_text_field("asset_id", STRING | STORED);
        let field = builder.add_text_field("field", STRING | STORED);
        let from_value = builder.add_text_field("from_value", STRING | STORED);
        let to_value = builder.add_text_field("to_value", STRING | STORED);
        let author = builder.add_text_field("author", STRING | STORED);
        let at = builder.add_i64_field("at", INDEXED | STORED | FAST);

        let schema = builder.build();

        Self {
            schema,
            asset_id,
            field,
            from_value,
            to_value,
            author,
            at,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for ChangeSchema {
    fn default() -> Self {
        Self::new()
    }
}
