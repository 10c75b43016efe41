//! Query language parsing and AST for asq asset search.
//!
//! This crate is the language half of asq: it turns query text in the
//! structured `field operator value` dialect into an immutable AST, and
//! provides the De Morgan rewrite that eliminates `NOT` nodes for
//! query-simplification consumers.
//!
//! ```
//! use asq_query::{normalize, parse_query};
//!
//! let query = parse_query("NOT (status = open AND priority < 3) ORDER BY name").unwrap();
//! let clause = query.where_clause.unwrap();
//! let simplified = normalize(&clause);
//! assert_eq!(
//!     simplified.to_query_string(),
//!     "status != open OR priority >= 3"
//! );
//! ```

#![warn(missing_docs)]

mod clause;
mod error;
mod lexer;
mod normalize;
mod operand;
mod operator;
mod parser;
mod position;
mod query;

pub use clause::{Clause, ClauseVisitor, TerminalClause};
pub use error::{ParseError, ParseErrorKind, render_char};
pub use lexer::{Token, TokenKind, tokenize};
pub use normalize::normalize;
pub use operand::{FunctionOperand, Operand, SingleValue};
pub use operator::{Operator, class};
pub use parser::{
    is_valid_field_name, is_valid_function_argument, is_valid_function_name, is_valid_value,
    parse_query,
};
pub use position::Position;
pub use query::{OrderBy, Query, SortDirection, SortField};
