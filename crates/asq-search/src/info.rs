//! Static clause metadata.
//!
//! A [`ClauseInformation`] identifies one searchable field: its names, the
//! backend index key it maps to, and the operators it supports. Instances
//! are built once at registry construction and shared read-only afterward;
//! they are never mutated.

use std::collections::HashSet;

use asq_query::Operator;

/// The case-insensitive names of a clause: one primary plus any aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseNames {
    /// The primary name, used in messages and rendering.
    primary: String,
    /// Accepted aliases.
    aliases: Vec<String>,
}

impl ClauseNames {
    /// Creates a name set with no aliases.
    pub fn single(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            aliases: Vec::new(),
        }
    }

    /// Creates a name set with aliases.
    pub fn with_aliases(primary: impl Into<String>, aliases: Vec<String>) -> Self {
        Self {
            primary: primary.into(),
            aliases,
        }
    }

    /// The primary name.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Every accepted name: the primary first, then the aliases.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Returns true when `name` matches any accepted name, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.all().any(|known| known.eq_ignore_ascii_case(name))
    }
}

/// The data type a clause's values carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Free text.
    Text,
    /// Numeric values.
    Number,
    /// Date values.
    Date,
    /// User references.
    User,
    /// A closed set of options (statuses, catalogs, manufacturers).
    Option,
}

/// Static, field-identifying metadata for one clause.
#[derive(Debug, Clone)]
pub struct ClauseInformation {
    /// Accepted names for the clause.
    pub names: ClauseNames,
    /// The backend-searchable index key. Absent for pseudo-fields that
    /// search across several index fields rather than any single one.
    pub index_field: Option<String>,
    /// The logical field identity used in messages and permission checks.
    /// May differ from `index_field`, and may also legitimately be absent.
    pub field_id: Option<String>,
    /// The operators this clause accepts.
    pub supported_operators: HashSet<Operator>,
    /// The data type of the clause's values.
    pub data_type: DataType,
}

impl ClauseInformation {
    /// Creates clause metadata.
    pub fn new(
        names: ClauseNames,
        index_field: Option<String>,
        field_id: Option<String>,
        supported_operators: HashSet<Operator>,
        data_type: DataType,
    ) -> Self {
        Self {
            names,
            index_field,
            field_id,
            supported_operators,
            data_type,
        }
    }

    /// Returns true when the clause supports `operator`.
    pub fn supports(&self, operator: Operator) -> bool {
        self.supported_operators.contains(&operator)
    }
}

/// Builds an operator set from the union of operator classes.
pub fn operators_from_classes(classes: &[&[Operator]]) -> HashSet<Operator> {
    classes
        .iter()
        .flat_map(|class| class.iter().copied())
        .collect()
}
