//! Operands: the right-hand side of a terminal clause.
//!
//! The operand space is a closed sum type. "No operand" is not representable;
//! a clause that carries no value carries [`Operand::Empty`].

use std::fmt;

/// A single literal value inside an operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SingleValue {
    /// A textual value (bare word or quoted string).
    Text(String),
    /// A numeric value.
    Number(i64),
}

impl SingleValue {
    /// Creates a textual value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a numeric value.
    pub fn number(value: i64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for SingleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => {
                // Quote anything that would not re-scan as one bare word.
                if text.is_empty() || text.contains(char::is_whitespace) {
                    write!(f, "\"{text}\"")
                } else {
                    f.write_str(text)
                }
            }
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

/// A function call operand: `name(arg, ...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionOperand {
    /// Function name as written (matched case-insensitively at resolution).
    pub name: String,
    /// Raw argument texts, in order.
    pub args: Vec<String>,
}

impl FunctionOperand {
    /// Creates a function operand.
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for FunctionOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(", "))
    }
}

/// The right-hand side of a terminal clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The explicit `EMPTY` marker.
    Empty,
    /// One literal value.
    Single(SingleValue),
    /// A parenthesized, comma-separated list. Lists may nest; resolution
    /// flattens them.
    Multi(Vec<Operand>),
    /// A function call resolved through a registry at validation time.
    Function(FunctionOperand),
}

impl Operand {
    /// Creates a textual single-value operand.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Single(SingleValue::text(value))
    }

    /// Creates a numeric single-value operand.
    pub fn number(value: i64) -> Self {
        Self::Single(SingleValue::number(value))
    }

    /// Creates a function operand.
    pub fn function(name: impl Into<String>, args: Vec<String>) -> Self {
        Self::Function(FunctionOperand::new(name, args))
    }

    /// Returns true for the `EMPTY` operand.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns true for a list operand.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Returns true for a function operand.
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("EMPTY"),
            Self::Single(value) => value.fmt(f),
            Self::Multi(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str(")")
            }
            Self::Function(func) => func.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates() {
        assert!(Operand::Empty.is_empty());
        assert!(!Operand::Empty.is_list());
        assert!(Operand::Multi(vec![]).is_list());
        assert!(Operand::function("currentUser", vec![]).is_function());
        assert!(!Operand::text("x").is_function());
    }

    #[test]
    fn display_single() {
        assert_eq!(Operand::text("high").to_string(), "high");
        assert_eq!(Operand::number(42).to_string(), "42");
        assert_eq!(Operand::text("two words").to_string(), "\"two words\"");
    }

    #[test]
    fn display_list_and_function() {
        let list = Operand::Multi(vec![Operand::text("a"), Operand::number(2)]);
        assert_eq!(list.to_string(), "(a, 2)");

        let func = Operand::function("membersOf", vec!["admins".to_string()]);
        assert_eq!(func.to_string(), "membersOf(admins)");
    }

    #[test]
    fn structural_equality() {
        assert_eq!(Operand::text("a"), Operand::text("a"));
        assert_ne!(Operand::text("a"), Operand::number(1));
        assert_eq!(
            Operand::Multi(vec![Operand::Empty]),
            Operand::Multi(vec![Operand::Empty])
        );
    }
}
