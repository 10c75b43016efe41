//! Index info resolution.
//!
//! Query text refers to domain entities by name or numeric id; the index
//! stores their indexed form. [`IndexInfoResolver`] translates a raw literal
//! into the indexed values actually stored in asset documents, backed by a
//! per-domain-type [`CatalogResolver`] collaborator.

use crate::literal::QueryLiteral;

/// Name/id lookup over one domain-constant type. Object safe; the
/// existence validator only needs this much.
pub trait NameLookup {
    /// Returns true when an entity with this id exists.
    fn id_exists(&self, id: i64) -> bool;

    /// All ids of entities matching this name.
    fn ids_from_name(&self, name: &str) -> Vec<i64>;

    /// Returns true when any entity matches this name.
    fn name_exists(&self, name: &str) -> bool {
        !self.ids_from_name(name).is_empty()
    }
}

/// A domain entity that knows its indexed form.
pub trait Indexed {
    /// The value stored for this entity in the backend document.
    fn indexed_value(&self) -> String;
}

/// Full catalog collaborator: name/id lookup plus entity access.
pub trait CatalogResolver: NameLookup {
    /// The domain entity type.
    type Entity: Indexed;

    /// Fetches one entity by id.
    fn get(&self, id: i64) -> Option<Self::Entity>;

    /// Every entity of this type.
    fn all(&self) -> Vec<Self::Entity>;
}

/// Object-safe view of index info resolution, as consumed by clause query
/// factories.
pub trait IndexedValueSource {
    /// The indexed values a resolved literal refers to. Empty literals and
    /// unknown values yield an empty list.
    fn indexed_values(&self, literal: &QueryLiteral) -> Vec<String>;
}

/// Maps raw literals (names or numeric ids) to indexed field values.
#[derive(Debug, Clone)]
pub struct IndexInfoResolver<R> {
    /// The catalog collaborator for this domain type.
    resolver: R,
}

impl<R: CatalogResolver> IndexInfoResolver<R> {
    /// Creates an index info resolver over a catalog collaborator.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Resolves a raw string value.
    ///
    /// The value is looked up as a *name* first; any matches win. Only when
    /// no name matches is the value opportunistically parsed as a numeric
    /// id, and the id itself included when it exists. A value matching
    /// neither yields an empty list: absence of matches is a valid,
    /// queryable outcome, not an error.
    pub fn indexed_values_for_text(&self, raw: &str) -> Vec<String> {
        let ids = self.resolver.ids_from_name(raw);
        if !ids.is_empty() {
            return ids
                .into_iter()
                .filter_map(|id| self.resolver.get(id))
                .map(|entity| entity.indexed_value())
                .collect();
        }

        // Numeric-id resolution is attempted opportunistically; parse
        // failure on non-numeric input is simply "no match".
        if let Ok(id) = raw.parse::<i64>()
            && self.resolver.id_exists(id)
        {
            return vec![id.to_string()];
        }

        Vec::new()
    }

    /// Resolves a raw numeric value: an existing id wins, otherwise the
    /// number is tried as a name.
    pub fn indexed_values_for_number(&self, raw: i64) -> Vec<String> {
        if self.resolver.id_exists(raw) {
            return vec![raw.to_string()];
        }
        self.indexed_values_for_text(&raw.to_string())
    }

    /// The indexed form of one domain entity.
    pub fn indexed_value(&self, entity: &R::Entity) -> String {
        entity.indexed_value()
    }
}

impl<R: CatalogResolver> IndexedValueSource for IndexInfoResolver<R> {
    fn indexed_values(&self, literal: &QueryLiteral) -> Vec<String> {
        match (literal.string_value(), literal.int_value()) {
            (Some(text), _) => self.indexed_values_for_text(text),
            (None, Some(value)) => self.indexed_values_for_number(value),
            (None, None) => Vec::new(),
        }
    }
}

/// One entity of a [`StaticCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticEntity {
    /// Entity id.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl Indexed for StaticEntity {
    fn indexed_value(&self) -> String {
        self.id.to_string()
    }
}

/// In-memory catalog of (id, name) entities.
///
/// Production deployments inject resolvers backed by their own stores; this
/// one backs the CLI demo catalog and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    /// The (id, name) rows.
    rows: Vec<(i64, String)>,
}

impl StaticCatalog {
    /// Creates a catalog from (id, name) rows.
    pub fn new(rows: Vec<(i64, String)>) -> Self {
        Self { rows }
    }

    /// Every display name, for suggestion sources.
    pub fn names(&self) -> Vec<String> {
        self.rows.iter().map(|(_, name)| name.clone()).collect()
    }
}

impl NameLookup for StaticCatalog {
    fn id_exists(&self, id: i64) -> bool {
        self.rows.iter().any(|(row_id, _)| *row_id == id)
    }

    fn ids_from_name(&self, name: &str) -> Vec<i64> {
        self.rows
            .iter()
            .filter(|(_, row_name)| row_name.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
            .collect()
    }
}

impl CatalogResolver for StaticCatalog {
    type Entity = StaticEntity;

    fn get(&self, id: i64) -> Option<StaticEntity> {
        self.rows
            .iter()
            .find(|(row_id, _)| *row_id == id)
            .map(|(id, name)| StaticEntity {
                id: *id,
                name: name.clone(),
            })
    }

    fn all(&self) -> Vec<StaticEntity> {
        self.rows
            .iter()
            .map(|(id, name)| StaticEntity {
                id: *id,
                name: name.clone(),
            })
            .collect()
    }
}

/// Value source that passes raw literal text through unchanged.
///
/// Fields such as serial numbers have no catalog behind them; the typed
/// value is the indexed value.
#[derive(Debug, Clone, Default)]
pub struct VerbatimValues;

impl IndexedValueSource for VerbatimValues {
    fn indexed_values(&self, literal: &QueryLiteral) -> Vec<String> {
        literal.raw().map(|raw| vec![raw]).unwrap_or_default()
    }
}
