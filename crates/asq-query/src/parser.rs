//! Query parser.
//!
//! Parses a token stream into a [`Query`] using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query      → or_clause? order_by?
//! or_clause  → and_clause (OR and_clause)*
//! and_clause → not_clause (AND not_clause)*
//! not_clause → NOT not_clause | "(" or_clause ")" | terminal
//! terminal   → field operator operand? predicate*
//! predicate  → (BEFORE|AFTER|ON|DURING|BY|FROM|TO) operand
//! operand    → EMPTY | value | "(" operand ("," operand)* ")" | name "(" args ")"
//! order_by   → ORDER BY field (ASC|DESC)? ("," field (ASC|DESC)?)*
//! ```
//!
//! `AND`/`OR` are also written `&`/`&&` and `|`/`||`. History predicates
//! after a `WAS`/`CHANGED` clause parse into sibling terminal clauses ANDed
//! with the history clause, keeping the clause type closed.

use crate::{
    clause::Clause,
    error::{ParseError, ParseErrorKind},
    lexer::{Token, TokenKind, tokenize},
    operand::{Operand, SingleValue},
    operator::Operator,
    position::Position,
    query::{OrderBy, Query, SortDirection, SortField},
};

/// Recursive descent parser over a token stream.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Token>,
    /// Current position in the token stream.
    position: usize,
}

impl Parser {
    /// Creates a parser from a token stream.
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses the token stream into a query.
    fn parse(mut self, raw: &str) -> Result<Query, ParseError> {
        let where_clause = if self.at_end() || self.at_order_by() {
            None
        } else {
            Some(self.parse_or_clause()?)
        };

        let order_by = if self.at_order_by() {
            Some(self.parse_order_by()?)
        } else {
            None
        };

        if let Some(token) = self.peek() {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    text: token.text.clone(),
                },
                token.position,
            ));
        }

        Ok(Query::new(where_clause, order_by, raw))
    }

    /// Parses: or_clause → and_clause (OR and_clause)*
    fn parse_or_clause(&mut self) -> Result<Clause, ParseError> {
        let mut left = self.parse_and_clause()?;

        while self.at_or() {
            self.advance();
            let right = self.parse_and_clause()?;
            left = Clause::or(vec![left, right]);
        }

        Ok(left)
    }

    /// Parses: and_clause → not_clause (AND not_clause)*
    fn parse_and_clause(&mut self) -> Result<Clause, ParseError> {
        let mut left = self.parse_not_clause()?;

        while self.at_and() {
            self.advance();
            let right = self.parse_not_clause()?;
            left = Clause::and(vec![left, right]);
        }

        Ok(left)
    }

    /// Parses: not_clause → NOT not_clause | "(" or_clause ")" | terminal
    fn parse_not_clause(&mut self) -> Result<Clause, ParseError> {
        if self.at_keyword("not") {
            self.advance();
            let inner = self.parse_not_clause()?;
            return Ok(Clause::not(inner));
        }

        if self.check(&TokenKind::LParen) {
            self.advance();
            let inner = self.parse_or_clause()?;
            self.expect_rparen()?;
            return Ok(inner);
        }

        self.parse_terminal()
    }

    /// Parses a terminal clause, including any history predicates.
    fn parse_terminal(&mut self) -> Result<Clause, ParseError> {
        let field = match self.peek() {
            Some(token) => match &token.kind {
                TokenKind::Word(name) | TokenKind::Text(name) => {
                    let name = name.clone();
                    self.advance();
                    name
                }
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedFieldName {
                            found: Some(token.text.clone()),
                        },
                        token.position,
                    ));
                }
            },
            None => {
                return Err(ParseError::without_position(
                    ParseErrorKind::ExpectedFieldName { found: None },
                ));
            }
        };

        let operator = self.parse_operator(&field)?;

        let operand = if operator == Operator::Changed {
            // CHANGED takes no written operand.
            Operand::Empty
        } else {
            self.parse_operand(&field)?
        };

        let main = Clause::terminal(field.clone(), operator, operand);

        // History predicates only follow history operators.
        if crate::operator::class::HISTORY.contains(&operator) {
            let predicates = self.parse_history_predicates(&field)?;
            if !predicates.is_empty() {
                let mut children = vec![main];
                children.extend(predicates);
                return Ok(Clause::And(children));
            }
        }

        Ok(main)
    }

    /// Parses the operator of a terminal clause.
    fn parse_operator(&mut self, field: &str) -> Result<Operator, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(ParseError::without_position(
                ParseErrorKind::ExpectedOperator {
                    field: field.to_string(),
                    found: None,
                },
            ));
        };

        let operator = match &token.kind {
            TokenKind::Equals => Some(Operator::Equals),
            TokenKind::NotEquals => Some(Operator::NotEquals),
            TokenKind::Like => Some(Operator::Like),
            TokenKind::NotLike => Some(Operator::NotLike),
            TokenKind::LessThan => Some(Operator::LessThan),
            TokenKind::LessThanEquals => Some(Operator::LessThanEquals),
            TokenKind::GreaterThan => Some(Operator::GreaterThan),
            TokenKind::GreaterThanEquals => Some(Operator::GreaterThanEquals),
            _ => None,
        };

        if let Some(operator) = operator {
            self.advance();
            return Ok(operator);
        }

        if self.at_keyword("in") {
            self.advance();
            return Ok(Operator::In);
        }

        if self.at_keyword("is") {
            self.advance();
            if self.at_keyword("not") {
                self.advance();
                return Ok(Operator::IsNot);
            }
            return Ok(Operator::Is);
        }

        if self.at_keyword("was") {
            self.advance();
            let negated = self.at_keyword("not");
            if negated {
                self.advance();
            }
            let listed = self.at_keyword("in");
            if listed {
                self.advance();
            }
            return Ok(match (negated, listed) {
                (false, false) => Operator::Was,
                (true, false) => Operator::WasNot,
                (false, true) => Operator::WasIn,
                (true, true) => Operator::WasNotIn,
            });
        }

        if self.at_keyword("changed") {
            self.advance();
            return Ok(Operator::Changed);
        }

        if self.at_keyword("not") {
            // `field NOT IN (...)`
            let not_token = token;
            self.advance();
            if self.at_keyword("in") {
                self.advance();
                return Ok(Operator::NotIn);
            }
            return Err(ParseError::new(
                ParseErrorKind::ExpectedOperator {
                    field: field.to_string(),
                    found: Some(not_token.text),
                },
                not_token.position,
            ));
        }

        Err(ParseError::new(
            ParseErrorKind::ExpectedOperator {
                field: field.to_string(),
                found: Some(token.text),
            },
            token.position,
        ))
    }

    /// Parses one operand.
    fn parse_operand(&mut self, field: &str) -> Result<Operand, ParseError> {
        let Some(token) = self.peek().cloned() else {
            return Err(ParseError::without_position(
                ParseErrorKind::ExpectedOperand {
                    field: field.to_string(),
                    found: None,
                },
            ));
        };

        match &token.kind {
            TokenKind::Word(word) if word.eq_ignore_ascii_case("empty")
                || word.eq_ignore_ascii_case("null") =>
            {
                self.advance();
                Ok(Operand::Empty)
            }
            TokenKind::Word(word) => {
                let word = word.clone();
                self.advance();
                if self.check(&TokenKind::LParen) {
                    let args = self.parse_function_args()?;
                    Ok(Operand::function(word, args))
                } else {
                    Ok(Operand::Single(SingleValue::text(word)))
                }
            }
            TokenKind::Text(text) => {
                let text = text.clone();
                self.advance();
                Ok(Operand::Single(SingleValue::text(text)))
            }
            TokenKind::Number(value) => {
                let value = *value;
                self.advance();
                Ok(Operand::Single(SingleValue::number(value)))
            }
            TokenKind::LParen => {
                self.advance();
                let mut items = vec![self.parse_operand(field)?];
                while self.check(&TokenKind::Comma) {
                    self.advance();
                    items.push(self.parse_operand(field)?);
                }
                self.expect_rparen()?;
                Ok(Operand::Multi(items))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::ExpectedOperand {
                    field: field.to_string(),
                    found: Some(token.text.clone()),
                },
                token.position,
            )),
        }
    }

    /// Parses a function argument list, the opening paren not yet consumed.
    fn parse_function_args(&mut self) -> Result<Vec<String>, ParseError> {
        self.advance(); // consume '('

        let mut args = Vec::new();

        if self.check(&TokenKind::RParen) {
            self.advance();
            return Ok(args);
        }

        loop {
            match self.peek() {
                Some(token) => match &token.kind {
                    TokenKind::Word(word) => {
                        args.push(word.clone());
                        self.advance();
                    }
                    TokenKind::Text(text) => {
                        args.push(text.clone());
                        self.advance();
                    }
                    TokenKind::Number(value) => {
                        args.push(value.to_string());
                        self.advance();
                    }
                    _ => {
                        return Err(ParseError::new(
                            ParseErrorKind::UnexpectedToken {
                                text: token.text.clone(),
                            },
                            token.position,
                        ));
                    }
                },
                None => {
                    return Err(ParseError::without_position(
                        ParseErrorKind::UnmatchedParenthesis,
                    ));
                }
            }

            if self.check(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }

        self.expect_rparen()?;
        Ok(args)
    }

    /// Parses trailing history predicates into terminal clauses.
    fn parse_history_predicates(&mut self, field: &str) -> Result<Vec<Clause>, ParseError> {
        /// Predicate keywords and the operators they carry.
        const PREDICATES: &[(&str, Operator)] = &[
            ("before", Operator::Before),
            ("after", Operator::After),
            ("on", Operator::On),
            ("during", Operator::During),
            ("by", Operator::By),
            ("from", Operator::From),
            ("to", Operator::To),
        ];

        let mut predicates = Vec::new();

        'outer: loop {
            for (keyword, operator) in PREDICATES {
                if self.at_keyword(keyword) {
                    self.advance();
                    let operand = self.parse_operand(field)?;
                    predicates.push(Clause::terminal(field, *operator, operand));
                    continue 'outer;
                }
            }
            break;
        }

        Ok(predicates)
    }

    /// Parses: order_by → ORDER BY field (ASC|DESC)? ("," ...)*
    fn parse_order_by(&mut self) -> Result<OrderBy, ParseError> {
        self.advance(); // consume ORDER

        if !self.at_keyword("by") {
            let (found, position) = self.found_here();
            return Err(ParseError::new(
                ParseErrorKind::BadOrderBy { found },
                position,
            ));
        }
        self.advance(); // consume BY

        let mut fields = Vec::new();

        loop {
            let field = match self.peek() {
                Some(token) => match &token.kind {
                    TokenKind::Word(name) | TokenKind::Text(name) => {
                        let name = name.clone();
                        self.advance();
                        name
                    }
                    _ => {
                        return Err(ParseError::new(
                            ParseErrorKind::BadOrderBy {
                                found: Some(token.text.clone()),
                            },
                            token.position,
                        ));
                    }
                },
                None => {
                    return Err(ParseError::without_position(ParseErrorKind::BadOrderBy {
                        found: None,
                    }));
                }
            };

            let direction = if self.at_keyword("asc") {
                self.advance();
                SortDirection::Ascending
            } else if self.at_keyword("desc") {
                self.advance();
                SortDirection::Descending
            } else {
                SortDirection::default()
            };

            fields.push(SortField::new(field, direction));

            if self.check(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            break;
        }

        Ok(OrderBy::new(fields))
    }

    /// Consumes a closing parenthesis or errors.
    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        if self.check(&TokenKind::RParen) {
            self.advance();
            Ok(())
        } else {
            let (_, position) = self.found_here();
            Err(ParseError::new(
                ParseErrorKind::UnmatchedParenthesis,
                position,
            ))
        }
    }

    /// The current token's text and position, for error reporting.
    fn found_here(&self) -> (Option<String>, Position) {
        match self.peek() {
            Some(token) => (Some(token.text.clone()), token.position),
            None => (None, Position::unknown()),
        }
    }

    /// Returns true at an `OR` (symbol or keyword).
    fn at_or(&self) -> bool {
        self.check(&TokenKind::Or) || self.at_keyword("or")
    }

    /// Returns true at an `AND` (symbol or keyword).
    fn at_and(&self) -> bool {
        self.check(&TokenKind::And) || self.at_keyword("and")
    }

    /// Returns true at the start of an `ORDER BY` tail.
    fn at_order_by(&self) -> bool {
        self.at_keyword("order") && self.keyword_at(self.position + 1, "by")
    }

    /// Returns true when the current token is the given keyword.
    fn at_keyword(&self, keyword: &str) -> bool {
        self.keyword_at(self.position, keyword)
    }

    /// Returns true when the token at `index` is the given keyword.
    fn keyword_at(&self, index: usize, keyword: &str) -> bool {
        matches!(
            self.tokens.get(index),
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) if word.eq_ignore_ascii_case(keyword)
        )
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Checks if the current token has the same kind as the given token.
    fn check(&self, kind: &TokenKind) -> bool {
        self.peek()
            .map(|token| std::mem::discriminant(&token.kind) == std::mem::discriminant(kind))
            .unwrap_or(false)
    }

    /// Returns true at end of input.
    fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }
}

/// Parses query text into a [`Query`].
///
/// An empty (or whitespace-only) input yields a query with no where-clause
/// and the empty ordering.
pub fn parse_query(text: &str) -> Result<Query, ParseError> {
    let tokens = tokenize(text)?;
    Parser::new(tokens).parse(text)
}

/// Returns true when `text` scans and parses as a single field name.
pub fn is_valid_field_name(text: &str) -> bool {
    single_token(text).is_some_and(|kind| matches!(kind, TokenKind::Word(_) | TokenKind::Text(_)))
}

/// Returns true when `text` scans as a single bare word usable as a
/// function name.
pub fn is_valid_function_name(text: &str) -> bool {
    single_token(text).is_some_and(|kind| matches!(kind, TokenKind::Word(_)))
}

/// Returns true when `text` scans as a single literal value.
pub fn is_valid_value(text: &str) -> bool {
    single_token(text).is_some_and(|kind| {
        matches!(
            kind,
            TokenKind::Word(_) | TokenKind::Text(_) | TokenKind::Number(_)
        )
    })
}

/// Returns true when `text` scans as a single function argument.
pub fn is_valid_function_argument(text: &str) -> bool {
    is_valid_value(text)
}

/// Scans `text` and returns its kind when it is exactly one token.
///
/// Recoverable grammar errors are swallowed: any scan failure is simply
/// "not valid". No partial AST is ever built.
fn single_token(text: &str) -> Option<TokenKind> {
    let mut tokens = tokenize(text).ok()?;
    if tokens.len() != 1 {
        return None;
    }
    Some(tokens.remove(0).kind)
}
