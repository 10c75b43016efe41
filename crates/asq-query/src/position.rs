//! Source positions for tokens and errors.
//!
//! Positions are 1-based line/column pairs. A position may be unknown (for
//! example at end of input, where there is no character to point at); unknown
//! components render as `?`.

use std::fmt;

/// Sentinel for an unknown line or column.
const UNKNOWN: i32 = -1;

/// A 1-based line/column position in the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// 1-based line number, or -1 when unknown.
    line: i32,
    /// 1-based column number, or -1 when unknown.
    column: i32,
}

impl Position {
    /// Creates a position from 1-based line and column numbers.
    pub fn new(line: u32, column: u32) -> Self {
        Self {
            line: line as i32,
            column: column as i32,
        }
    }

    /// Creates the unknown position.
    pub fn unknown() -> Self {
        Self {
            line: UNKNOWN,
            column: UNKNOWN,
        }
    }

    /// Returns the 1-based line number, or -1 when unknown.
    pub fn line(&self) -> i32 {
        self.line
    }

    /// Returns the 1-based column number, or -1 when unknown.
    pub fn column(&self) -> i32 {
        self.column
    }

    /// Returns true when neither line nor column is known.
    pub fn is_unknown(&self) -> bool {
        self.line == UNKNOWN && self.column == UNKNOWN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        /// Formats one coordinate, substituting `?` for the sentinel.
        fn coord(value: i32) -> String {
            if value == UNKNOWN {
                "?".to_string()
            } else {
                value.to_string()
            }
        }

        write!(f, "line {}, column {}", coord(self.line), coord(self.column))
    }
}
