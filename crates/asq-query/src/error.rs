//! Error types for query scanning and parsing.
//!
//! Every error carries a stable message key (for localized rendering by a
//! presentation layer) and a position. Lexical errors are terminal: the
//! scanner never skips an offending character and keeps going.

use std::{error::Error, fmt};

use crate::position::Position;

/// The specific kind of parse error, with any offending text attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A reserved word was used as a bare word.
    ReservedWord {
        /// The reserved word as written.
        word: String,
    },

    /// An illegal escape sequence. `text` is the offending sequence, absent
    /// when the input ended directly after the backslash.
    IllegalEscape {
        /// The escape sequence as written (e.g. `\x`), if any.
        text: Option<String>,
    },

    /// A quoted string that was never closed before the end of input.
    UnterminatedString,

    /// A quoted string interrupted by a newline.
    UnterminatedStringAtNewline,

    /// A character that may not appear in a query at all. `rendered` is the
    /// printable rendering of the character.
    IllegalCharacter {
        /// Printable rendering of the character (see [`render_char`]).
        rendered: String,
    },

    /// A character reserved for future use. `rendered` as above.
    ReservedCharacter {
        /// Printable rendering of the character.
        rendered: String,
    },

    /// Catch-all for an unclassified scanner fault at a known position.
    Unknown {
        /// The offending text, if any.
        text: Option<String>,
    },

    /// Catch-all for an unclassified scanner fault with no position.
    UnknownNoPosition,

    /// Expected a field name.
    ExpectedFieldName {
        /// The token found instead, if any.
        found: Option<String>,
    },

    /// Expected an operator after a field name.
    ExpectedOperator {
        /// The field the operator would apply to.
        field: String,
        /// The token found instead, if any.
        found: Option<String>,
    },

    /// Expected an operand after an operator.
    ExpectedOperand {
        /// The field the operand would apply to.
        field: String,
        /// The token found instead, if any.
        found: Option<String>,
    },

    /// Expected a clause (after `AND`, `OR`, `NOT`, or an opening paren).
    ExpectedClause {
        /// The token found instead, if any.
        found: Option<String>,
    },

    /// An opening parenthesis without a matching closing one.
    UnmatchedParenthesis,

    /// Input remained after a complete query was parsed.
    UnexpectedToken {
        /// The text of the unexpected token.
        text: String,
    },

    /// A malformed `ORDER BY` tail.
    BadOrderBy {
        /// The token found instead of a sort field, if any.
        found: Option<String>,
    },
}

impl ParseErrorKind {
    /// Returns the stable message key for this error kind.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::ReservedWord { .. } => "reserved-word",
            Self::IllegalEscape { text: Some(_) } => "illegal-escape",
            Self::IllegalEscape { text: None } => "illegal-escape-blank",
            Self::UnterminatedString => "unterminated-string",
            Self::UnterminatedStringAtNewline => "unterminated-string-newline",
            Self::IllegalCharacter { .. } => "illegal-character",
            Self::ReservedCharacter { .. } => "reserved-character",
            Self::Unknown { .. } => "unknown-error",
            Self::UnknownNoPosition => "unknown-error-no-position",
            Self::ExpectedFieldName { .. } => "expected-field-name",
            Self::ExpectedOperator { .. } => "expected-operator",
            Self::ExpectedOperand { .. } => "expected-operand",
            Self::ExpectedClause { .. } => "expected-clause",
            Self::UnmatchedParenthesis => "unmatched-parenthesis",
            Self::UnexpectedToken { .. } => "unexpected-token",
            Self::BadOrderBy { .. } => "bad-order-by",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedWord { word } => {
                write!(f, "'{word}' is a reserved word and must be quoted")
            }
            Self::IllegalEscape { text: Some(text) } => {
                write!(f, "illegal escape sequence '{text}'")
            }
            Self::IllegalEscape { text: None } => write!(f, "illegal escape sequence"),
            Self::UnterminatedString => write!(f, "unterminated string at end of input"),
            Self::UnterminatedStringAtNewline => write!(f, "string interrupted by a line break"),
            Self::IllegalCharacter { rendered } => write!(f, "illegal character '{rendered}'"),
            Self::ReservedCharacter { rendered } => {
                write!(f, "reserved character '{rendered}' must be quoted")
            }
            Self::Unknown { text: Some(text) } => write!(f, "unrecognized input '{text}'"),
            Self::Unknown { text: None } | Self::UnknownNoPosition => {
                write!(f, "unrecognized input")
            }
            Self::ExpectedFieldName { found } => match found {
                Some(text) => write!(f, "expected a field name, found '{text}'"),
                None => write!(f, "expected a field name"),
            },
            Self::ExpectedOperator { field, found } => match found {
                Some(text) => write!(f, "expected an operator after '{field}', found '{text}'"),
                None => write!(f, "expected an operator after '{field}'"),
            },
            Self::ExpectedOperand { field, found } => match found {
                Some(text) => write!(f, "expected a value for '{field}', found '{text}'"),
                None => write!(f, "expected a value for '{field}'"),
            },
            Self::ExpectedClause { found } => match found {
                Some(text) => write!(f, "expected a clause, found '{text}'"),
                None => write!(f, "expected a clause"),
            },
            Self::UnmatchedParenthesis => write!(f, "expected a closing parenthesis"),
            Self::UnexpectedToken { text } => write!(f, "unexpected input '{text}'"),
            Self::BadOrderBy { found } => match found {
                Some(text) => write!(f, "expected a sort field, found '{text}'"),
                None => write!(f, "expected a sort field"),
            },
        }
    }
}

/// A parse error: a kind plus the position it occurred at.
///
/// Parsing never partially succeeds; a `ParseError` means no AST was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Where it went wrong. May be [`Position::unknown`], e.g. at end of input.
    pub position: Position,
}

impl ParseError {
    /// Creates a parse error at the given position.
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Creates a parse error with no position information.
    pub fn without_position(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            position: Position::unknown(),
        }
    }

    /// Returns the stable message key for this error.
    pub fn message_key(&self) -> &'static str {
        self.kind.message_key()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.position)
    }
}

impl Error for ParseError {}

/// Renders a character so it is always printable in an error message.
///
/// Tab gets its conventional name; other control and whitespace characters
/// render as `U+XXXX`; everything else renders as itself.
pub fn render_char(ch: char) -> String {
    if ch == '\t' {
        "TAB".to_string()
    } else if ch.is_control() || ch.is_whitespace() {
        format!("U+{:04X}", ch as u32)
    } else {
        ch.to_string()
    }
}
