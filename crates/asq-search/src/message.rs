//! Validation messages.
//!
//! Validators report problems through [`MessageSet`]: an ordered, additive
//! collection of keyed messages. An empty set means the clause is valid. A
//! set with only warnings is still executable; any error blocks execution.

use std::fmt;

use serde::Serialize;

/// How serious a validation message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The query can still run.
    Warning,
    /// The query must not run.
    Error,
}

/// One validation message: a stable key plus its arguments.
///
/// The key identifies the message for localized rendering by a presentation
/// layer; [`fmt::Display`] provides a default English rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Message severity.
    pub severity: Severity,
    /// Stable message key.
    pub key: &'static str,
    /// Positional message arguments.
    pub args: Vec<String>,
}

impl Message {
    /// Creates a message.
    pub fn new(severity: Severity, key: &'static str, args: Vec<String>) -> Self {
        Self {
            severity,
            key,
            args,
        }
    }

    /// Creates an error message.
    pub fn error(key: &'static str, args: Vec<String>) -> Self {
        Self::new(Severity::Error, key, args)
    }

    /// Creates a warning message.
    pub fn warning(key: &'static str, args: Vec<String>) -> Self {
        Self::new(Severity::Warning, key, args)
    }

    /// Returns the nth argument, or an empty string.
    fn arg(&self, index: usize) -> &str {
        self.args.get(index).map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key {
            "operator-not-supported" => write!(
                f,
                "the operator '{}' is not supported by the '{}' field",
                self.arg(0),
                self.arg(1)
            ),
            "value-does-not-exist" => write!(
                f,
                "the value '{}' does not exist for the field '{}'",
                self.arg(0),
                self.arg(1)
            ),
            "value-from-function-does-not-exist" => write!(
                f,
                "a value provided by the function '{}' does not exist for the field '{}'",
                self.arg(0),
                self.arg(1)
            ),
            "illegal-function" => {
                write!(f, "the function '{}' is not known", self.arg(0))
            }
            "unknown-field" => {
                write!(f, "the field '{}' is not searchable", self.arg(0))
            }
            "field-not-visible" => {
                write!(f, "the field '{}' is not visible to you", self.arg(0))
            }
            key => {
                write!(f, "{key}")?;
                for arg in &self.args {
                    write!(f, " '{arg}'")?;
                }
                Ok(())
            }
        }
    }
}

/// An ordered collection of validation messages.
///
/// Message sets are additive only: composition appends, it never removes
/// messages added by an earlier validator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MessageSet {
    /// The messages in the order they were added.
    messages: Vec<Message>,
}

impl MessageSet {
    /// Creates an empty message set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Appends every message of another set, preserving order.
    pub fn extend(&mut self, other: Self) {
        self.messages.extend(other.messages);
    }

    /// Returns true when no messages were added (the clause is valid).
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns true when any message is an error.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|message| message.severity == Severity::Error)
    }

    /// The messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl IntoIterator for MessageSet {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_valid() {
        let set = MessageSet::new();
        assert!(set.is_empty());
        assert!(!set.has_errors());
    }

    #[test]
    fn warnings_alone_are_not_errors() {
        let mut set = MessageSet::new();
        set.push(Message::warning("value-does-not-exist", vec![
            "x".into(),
            "assignee".into(),
        ]));
        assert!(!set.is_empty());
        assert!(!set.has_errors());
    }

    #[test]
    fn any_error_marks_the_set() {
        let mut set = MessageSet::new();
        set.push(Message::warning("value-does-not-exist", vec![]));
        set.push(Message::error("operator-not-supported", vec![]));
        assert!(set.has_errors());
    }

    #[test]
    fn extend_preserves_order() {
        let mut first = MessageSet::new();
        first.push(Message::error("unknown-field", vec!["a".into()]));
        let mut second = MessageSet::new();
        second.push(Message::error("illegal-function", vec!["f".into()]));

        first.extend(second);
        let keys: Vec<&str> = first.messages().iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["unknown-field", "illegal-function"]);
    }

    #[test]
    fn display_renders_known_keys() {
        let message = Message::error(
            "operator-not-supported",
            vec!["~".into(), "created".into()],
        );
        assert_eq!(
            message.to_string(),
            "the operator '~' is not supported by the 'created' field"
        );
    }

    #[test]
    fn display_distinguishes_function_and_literal_sources() {
        let literal = Message::error("value-does-not-exist", vec!["x".into(), "status".into()]);
        let function = Message::error(
            "value-from-function-does-not-exist",
            vec!["allStatuses".into(), "status".into()],
        );
        assert_ne!(literal.to_string(), function.to_string());
        assert!(function.to_string().contains("function"));
    }

    #[test]
    fn display_falls_back_to_key() {
        let message = Message::error("some-new-key", vec!["a".into()]);
        assert_eq!(message.to_string(), "some-new-key 'a'");
    }
}
