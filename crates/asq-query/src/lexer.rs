//! Query scanner (tokenizer).
//!
//! Converts query text into a stream of positioned tokens. The scanner fails
//! fast: any lexical fault (illegal escape, unterminated string, reserved
//! word or character) is a terminal [`ParseError`] rather than a skipped
//! character, so no input is ever silently dropped.

use std::{iter::Peekable, str::Chars};

use crate::{
    error::{ParseError, ParseErrorKind, render_char},
    position::Position,
};

/// Characters reserved for future use in the query language. Using one
/// outside a quoted string is an error.
const RESERVED_CHARS: &[char] = &[
    '{', '}', '*', '/', '%', '+', '^', '$', '#', '@', '?', ';', '[', ']',
];

/// Words reserved by the query language. Using one as a bare word is an
/// error; quoting makes it an ordinary value.
const RESERVED_WORDS: &[&str] = &[
    "alter", "between", "create", "delete", "distinct", "drop", "escape", "exists", "grant",
    "group", "having", "index", "insert", "intersect", "limit", "modify", "revoke", "select",
    "table", "truncate", "union", "update", "view", "where",
];

/// Characters that end a bare word.
const WORD_DELIMITERS: &[char] = &[
    '"', '\'', '(', ')', ',', '=', '!', '<', '>', '~', '&', '|',
];

/// The kind of a scanned token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A bare word with escape sequences decoded. Field names, values,
    /// function names, and keywords all arrive as words; keywords are
    /// recognized by the parser.
    Word(String),

    /// A quoted string with quotes stripped and escapes decoded.
    Text(String),

    /// A numeric value.
    Number(i64),

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `~`
    Like,
    /// `!~`
    NotLike,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEquals,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEquals,
    /// `&` or `&&`
    And,
    /// `|` or `||`
    Or,
}

/// A token together with its raw text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was scanned.
    pub kind: TokenKind,
    /// The raw matched text, for error messages.
    pub text: String,
    /// Position of the token's first character.
    pub position: Position,
}

impl Token {
    /// Creates a token.
    fn new(kind: TokenKind, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

/// Tokenizes query text.
struct Lexer<'a> {
    /// Character iterator with one-character lookahead.
    chars: Peekable<Chars<'a>>,
    /// 1-based line of the next character.
    line: u32,
    /// 1-based column of the next character.
    column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// The position of the next (unconsumed) character.
    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Consumes one character, updating line/column tracking.
    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Tokenizes the entire input, returning all tokens or the first error.
    fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or `None` at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_whitespace();

        let position = self.position();
        let Some(&ch) = self.chars.peek() else {
            return Ok(None);
        };

        let token = match ch {
            '"' | '\'' => self.read_string(position)?,
            '(' => self.single(TokenKind::LParen, "(" ),
            ')' => self.single(TokenKind::RParen, ")"),
            ',' => self.single(TokenKind::Comma, ","),
            '=' => self.single(TokenKind::Equals, "="),
            '~' => self.single(TokenKind::Like, "~"),
            '!' => self.read_bang(position)?,
            '<' => self.read_comparison(TokenKind::LessThan, TokenKind::LessThanEquals, "<"),
            '>' => self.read_comparison(TokenKind::GreaterThan, TokenKind::GreaterThanEquals, ">"),
            '&' => self.read_doubled('&', TokenKind::And),
            '|' => self.read_doubled('|', TokenKind::Or),
            _ if RESERVED_CHARS.contains(&ch) => {
                return Err(ParseError::new(
                    ParseErrorKind::ReservedCharacter {
                        rendered: render_char(ch),
                    },
                    position,
                ));
            }
            _ if ch.is_control() => {
                return Err(ParseError::new(
                    ParseErrorKind::IllegalCharacter {
                        rendered: render_char(ch),
                    },
                    position,
                ));
            }
            _ => self.read_word(position)?,
        };

        Ok(Some(token))
    }

    /// Consumes one character and produces a single-character token.
    fn single(&mut self, kind: TokenKind, text: &str) -> Token {
        let position = self.position();
        self.advance();
        Token::new(kind, text, position)
    }

    /// Reads `!=` or `!~`; a lone `!` is a reserved character.
    fn read_bang(&mut self, position: Position) -> Result<Token, ParseError> {
        self.advance(); // consume '!'
        match self.chars.peek() {
            Some('=') => {
                self.advance();
                Ok(Token::new(TokenKind::NotEquals, "!=", position))
            }
            Some('~') => {
                self.advance();
                Ok(Token::new(TokenKind::NotLike, "!~", position))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::ReservedCharacter {
                    rendered: render_char('!'),
                },
                position,
            )),
        }
    }

    /// Reads `<`/`<=` or `>`/`>=`.
    fn read_comparison(&mut self, bare: TokenKind, with_equals: TokenKind, text: &str) -> Token {
        let position = self.position();
        self.advance();
        if self.chars.peek() == Some(&'=') {
            self.advance();
            Token::new(with_equals, format!("{text}="), position)
        } else {
            Token::new(bare, text, position)
        }
    }

    /// Reads `&`/`&&` or `|`/`||`, both accepted for the same keyword.
    fn read_doubled(&mut self, ch: char, kind: TokenKind) -> Token {
        let position = self.position();
        self.advance();
        if self.chars.peek() == Some(&ch) {
            self.advance();
            Token::new(kind, format!("{ch}{ch}"), position)
        } else {
            Token::new(kind, ch.to_string(), position)
        }
    }

    /// Reads a quoted string, decoding escape sequences.
    fn read_string(&mut self, start: Position) -> Result<Token, ParseError> {
        let quote = self.advance().unwrap_or('"');
        let mut content = String::new();

        loop {
            let position = self.position();
            match self.chars.peek() {
                None => {
                    // End of input inside a string: there is no character to
                    // point at, so the position is the unknown sentinel.
                    return Err(ParseError::without_position(
                        ParseErrorKind::UnterminatedString,
                    ));
                }
                Some(&'\n') => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedStringAtNewline,
                        position,
                    ));
                }
                Some(&'\\') => content.push(self.read_escape(position)?),
                Some(&ch) if ch == quote => {
                    self.advance();
                    return Ok(Token::new(
                        TokenKind::Text(content.clone()),
                        format!("{quote}{content}{quote}"),
                        start,
                    ));
                }
                Some(&ch) => {
                    content.push(ch);
                    self.advance();
                }
            }
        }
    }

    /// Reads one escape sequence, returning the decoded character.
    ///
    /// `backslash` is the position of the backslash, which is where any
    /// resulting error points.
    fn read_escape(&mut self, backslash: Position) -> Result<char, ParseError> {
        self.advance(); // consume '\'

        let Some(&ch) = self.chars.peek() else {
            // Input ends right after the backslash: no offending text.
            return Err(ParseError::new(
                ParseErrorKind::IllegalEscape { text: None },
                backslash,
            ));
        };

        let decoded = match ch {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            ' ' => ' ',
            'u' => {
                self.advance();
                return self.read_unicode_escape(backslash);
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::IllegalEscape {
                        text: Some(format!("\\{other}")),
                    },
                    backslash,
                ));
            }
        };

        self.advance();
        Ok(decoded)
    }

    /// Reads the four hex digits of a `\uXXXX` escape.
    fn read_unicode_escape(&mut self, backslash: Position) -> Result<char, ParseError> {
        let mut digits = String::new();
        for _ in 0..4 {
            match self.chars.peek() {
                Some(&ch) if ch.is_ascii_hexdigit() => {
                    digits.push(ch);
                    self.advance();
                }
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::IllegalEscape {
                            text: Some(format!("\\u{digits}")),
                        },
                        backslash,
                    ));
                }
            }
        }

        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::IllegalEscape {
                        text: Some(format!("\\u{digits}")),
                    },
                    backslash,
                )
            })
    }

    /// Reads a bare word, decoding escapes and classifying numbers and
    /// reserved words.
    fn read_word(&mut self, start: Position) -> Result<Token, ParseError> {
        let mut word = String::new();

        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || WORD_DELIMITERS.contains(&ch) {
                break;
            }
            if RESERVED_CHARS.contains(&ch) {
                return Err(ParseError::new(
                    ParseErrorKind::ReservedCharacter {
                        rendered: render_char(ch),
                    },
                    self.position(),
                ));
            }
            if ch.is_control() {
                return Err(ParseError::new(
                    ParseErrorKind::IllegalCharacter {
                        rendered: render_char(ch),
                    },
                    self.position(),
                ));
            }
            if ch == '\\' {
                let position = self.position();
                word.push(self.read_escape(position)?);
                continue;
            }
            word.push(ch);
            self.advance();
        }

        if let Ok(number) = word.parse::<i64>() {
            return Ok(Token::new(TokenKind::Number(number), word, start));
        }

        if RESERVED_WORDS.contains(&word.to_ascii_lowercase().as_str()) {
            return Err(ParseError::new(
                ParseErrorKind::ReservedWord { word },
                start,
            ));
        }

        Ok(Token::new(TokenKind::Word(word.clone()), word, start))
    }

    /// Skips whitespace characters, tracking line breaks.
    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}

/// Tokenizes query text into a token stream.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(input).tokenize()
}
