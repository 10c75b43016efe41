//! Resolved query literals.
//!
//! A [`QueryLiteral`] is one concrete value produced by resolving an
//! operand: a string, an integer, or an explicit empty value. The source
//! operand travels with the literal so later stages can tell a typed value
//! apart from one produced by a function.

use asq_query::Operand;

/// A single resolved value derived from an operand.
///
/// Exactly one of the string/int values is set, or neither for an explicit
/// empty literal. Both set is not constructible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLiteral {
    /// The string value, if this literal is textual.
    string_value: Option<String>,
    /// The integer value, if this literal is numeric.
    int_value: Option<i64>,
    /// The operand this literal was resolved from.
    pub source: Operand,
}

impl QueryLiteral {
    /// Creates a textual literal.
    pub fn of_text(source: Operand, value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            int_value: None,
            source,
        }
    }

    /// Creates a numeric literal.
    pub fn of_number(source: Operand, value: i64) -> Self {
        Self {
            string_value: None,
            int_value: Some(value),
            source,
        }
    }

    /// Creates an explicit empty literal.
    pub fn empty(source: Operand) -> Self {
        Self {
            string_value: None,
            int_value: None,
            source,
        }
    }

    /// The string value, if textual.
    pub fn string_value(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    /// The integer value, if numeric.
    pub fn int_value(&self) -> Option<i64> {
        self.int_value
    }

    /// Returns true for the explicit empty literal.
    pub fn is_empty(&self) -> bool {
        self.string_value.is_none() && self.int_value.is_none()
    }

    /// The literal rendered as raw text, or `None` when empty.
    pub fn raw(&self) -> Option<String> {
        match (&self.string_value, self.int_value) {
            (Some(text), _) => Some(text.clone()),
            (None, Some(value)) => Some(value.to_string()),
            (None, None) => None,
        }
    }

    /// Returns true when this literal came from a function operand.
    pub fn from_function(&self) -> bool {
        self.source.is_function()
    }
}
