//! Query operators.
//!
//! The operator set is closed: every operator a terminal clause can carry is
//! a variant here, and validators reason about operators through the named
//! class slices in [`class`] rather than ad-hoc lists.

use std::fmt;

/// An operator in a terminal clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `~` (text match)
    Like,
    /// `!~`
    NotLike,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEquals,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEquals,
    /// `WAS` (history)
    Was,
    /// `WAS NOT`
    WasNot,
    /// `WAS IN`
    WasIn,
    /// `WAS NOT IN`
    WasNotIn,
    /// `CHANGED` (history)
    Changed,
    /// History predicate `BEFORE`
    Before,
    /// History predicate `AFTER`
    After,
    /// History predicate `ON`
    On,
    /// History predicate `DURING`
    During,
    /// History predicate `BY`
    By,
    /// History predicate `FROM`
    From,
    /// History predicate `TO`
    To,
}

/// Named operator classes used to build validator whitelists.
pub mod class {
    use super::Operator;

    /// Equality operators.
    pub const EQUALITY: &[Operator] = &[Operator::Equals, Operator::NotEquals];

    /// Relational (ordering) operators.
    pub const RELATIONAL: &[Operator] = &[
        Operator::GreaterThan,
        Operator::GreaterThanEquals,
        Operator::LessThan,
        Operator::LessThanEquals,
    ];

    /// Text-match operators.
    pub const LIKE: &[Operator] = &[Operator::Like, Operator::NotLike];

    /// Operators that take a list operand.
    pub const LIST: &[Operator] = &[
        Operator::In,
        Operator::NotIn,
        Operator::WasIn,
        Operator::WasNotIn,
    ];

    /// Operators that accept the `EMPTY` operand.
    pub const EMPTY: &[Operator] = &[
        Operator::Is,
        Operator::IsNot,
        Operator::Equals,
        Operator::NotEquals,
        Operator::In,
        Operator::NotIn,
    ];

    /// History operators over a field's change log.
    pub const HISTORY: &[Operator] = &[
        Operator::Was,
        Operator::WasNot,
        Operator::WasIn,
        Operator::WasNotIn,
        Operator::Changed,
    ];

    /// Predicates qualifying a history operator.
    pub const HISTORY_PREDICATE: &[Operator] = &[
        Operator::Before,
        Operator::After,
        Operator::On,
        Operator::During,
        Operator::By,
        Operator::From,
        Operator::To,
    ];
}

impl Operator {
    /// Returns the complementary operator under classical negation, or
    /// `None` when no complement exists in the closed set.
    ///
    /// Strict orderings flip to the complementary non-strict ordering and
    /// vice versa, so the mapping is an involution over the defined pairs.
    pub fn negation(self) -> Option<Self> {
        match self {
            Self::Equals => Some(Self::NotEquals),
            Self::NotEquals => Some(Self::Equals),
            Self::Like => Some(Self::NotLike),
            Self::NotLike => Some(Self::Like),
            Self::In => Some(Self::NotIn),
            Self::NotIn => Some(Self::In),
            Self::Is => Some(Self::IsNot),
            Self::IsNot => Some(Self::Is),
            Self::GreaterThan => Some(Self::LessThanEquals),
            Self::LessThanEquals => Some(Self::GreaterThan),
            Self::LessThan => Some(Self::GreaterThanEquals),
            Self::GreaterThanEquals => Some(Self::LessThan),
            Self::Was => Some(Self::WasNot),
            Self::WasNot => Some(Self::Was),
            Self::WasIn => Some(Self::WasNotIn),
            Self::WasNotIn => Some(Self::WasIn),
            Self::Changed
            | Self::Before
            | Self::After
            | Self::On
            | Self::During
            | Self::By
            | Self::From
            | Self::To => None,
        }
    }

    /// Returns true when this operator requires a list operand.
    pub fn takes_list(self) -> bool {
        class::LIST.contains(&self)
    }

    /// The operator as it appears in query text.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::GreaterThan => ">",
            Self::GreaterThanEquals => ">=",
            Self::LessThan => "<",
            Self::LessThanEquals => "<=",
            Self::Was => "WAS",
            Self::WasNot => "WAS NOT",
            Self::WasIn => "WAS IN",
            Self::WasNotIn => "WAS NOT IN",
            Self::Changed => "CHANGED",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::On => "ON",
            Self::During => "DURING",
            Self::By => "BY",
            Self::From => "FROM",
            Self::To => "TO",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
