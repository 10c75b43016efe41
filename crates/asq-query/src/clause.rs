//! The clause abstract syntax tree.
//!
//! A clause is either a terminal `field operator operand` triple or a boolean
//! combinator over sub-clauses. Trees are immutable once parsed; rewrites
//! such as De Morgan normalization build new trees.

use std::fmt;

use crate::{operand::Operand, operator::Operator};

/// A terminal clause: `field operator operand`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TerminalClause {
    /// The clause (field) name as written.
    pub field: String,
    /// The comparison operator.
    pub operator: Operator,
    /// The right-hand side.
    pub operand: Operand,
}

impl TerminalClause {
    /// Creates a terminal clause.
    pub fn new(field: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        Self {
            field: field.into(),
            operator,
            operand,
        }
    }
}

impl fmt::Display for TerminalClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operand.is_empty() && self.operator == Operator::Changed {
            // CHANGED takes no written operand.
            write!(f, "{} {}", self.field, self.operator)
        } else {
            write!(f, "{} {} {}", self.field, self.operator, self.operand)
        }
    }
}

/// A node in the query clause tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Clause {
    /// A single `field operator operand` comparison.
    Terminal(TerminalClause),
    /// Conjunction: all children must hold.
    And(Vec<Self>),
    /// Disjunction: at least one child must hold.
    Or(Vec<Self>),
    /// Negation of the inner clause.
    Not(Box<Self>),
}

impl Clause {
    /// Creates a terminal clause node.
    pub fn terminal(field: impl Into<String>, operator: Operator, operand: Operand) -> Self {
        Self::Terminal(TerminalClause::new(field, operator, operand))
    }

    /// Creates an And node, flattening nested Ands and unwrapping singletons.
    pub fn and(clauses: Vec<Self>) -> Self {
        let flattened: Vec<Self> = clauses
            .into_iter()
            .flat_map(|clause| match clause {
                Self::And(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            1 => flattened.into_iter().next().unwrap(),
            _ => Self::And(flattened),
        }
    }

    /// Creates an Or node, flattening nested Ors and unwrapping singletons.
    pub fn or(clauses: Vec<Self>) -> Self {
        let flattened: Vec<Self> = clauses
            .into_iter()
            .flat_map(|clause| match clause {
                Self::Or(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flattened.len() {
            1 => flattened.into_iter().next().unwrap(),
            _ => Self::Or(flattened),
        }
    }

    /// Creates a Not node.
    pub fn not(clause: Self) -> Self {
        Self::Not(Box::new(clause))
    }

    /// Dispatches this node to a visitor.
    pub fn accept<V: ClauseVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Terminal(terminal) => visitor.visit_terminal(terminal),
            Self::And(children) => visitor.visit_and(children),
            Self::Or(children) => visitor.visit_or(children),
            Self::Not(inner) => visitor.visit_not(inner),
        }
    }

    /// Collects every terminal clause in the tree, left to right.
    pub fn terminals(&self) -> Vec<&TerminalClause> {
        let mut found = Vec::new();
        self.collect_terminals(&mut found);
        found
    }

    /// Recursive helper for [`Self::terminals`].
    fn collect_terminals<'a>(&'a self, found: &mut Vec<&'a TerminalClause>) {
        match self {
            Self::Terminal(terminal) => found.push(terminal),
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_terminals(found);
                }
            }
            Self::Not(inner) => inner.collect_terminals(found),
        }
    }

    /// Formats the tree with one node per line at the given indentation.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Terminal(terminal) => writeln!(f, "{prefix}Terminal({terminal})"),
            Self::And(children) => {
                writeln!(f, "{prefix}And")?;
                for child in children {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Or(children) => {
                writeln!(f, "{prefix}Or")?;
                for child in children {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
        }
    }

    /// Renders the clause as canonical query text.
    pub fn to_query_string(&self) -> String {
        self.fmt_query_string(false)
    }

    /// Internal helper for query string rendering.
    fn fmt_query_string(&self, nested: bool) -> String {
        match self {
            Self::Terminal(terminal) => terminal.to_string(),
            Self::And(children) => {
                let parts: Vec<String> =
                    children.iter().map(|c| c.fmt_query_string(true)).collect();
                let joined = parts.join(" AND ");
                if nested && children.len() > 1 {
                    format!("({joined})")
                } else {
                    joined
                }
            }
            Self::Or(children) => {
                let parts: Vec<String> =
                    children.iter().map(|c| c.fmt_query_string(true)).collect();
                let joined = parts.join(" OR ");
                if nested && children.len() > 1 {
                    format!("({joined})")
                } else {
                    joined
                }
            }
            Self::Not(inner) => format!("NOT {}", inner.fmt_query_string(true)),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

/// Read-only visitor over a clause tree.
///
/// Default implementations recurse into children, so a visitor only needs to
/// override the node kinds it cares about.
pub trait ClauseVisitor {
    /// Called for every terminal clause.
    fn visit_terminal(&mut self, terminal: &TerminalClause);

    /// Called for every And node. The default walks the children.
    fn visit_and(&mut self, children: &[Clause]) {
        for child in children {
            child.accept(self);
        }
    }

    /// Called for every Or node. The default walks the children.
    fn visit_or(&mut self, children: &[Clause]) {
        for child in children {
            child.accept(self);
        }
    }

    /// Called for every Not node. The default walks the inner clause.
    fn visit_not(&mut self, inner: &Clause) {
        inner.accept(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Operand;

    fn term(field: &str) -> Clause {
        Clause::terminal(field, Operator::Equals, Operand::text("x"))
    }

    #[test]
    fn and_flattens_nested() {
        let nested = Clause::and(vec![
            term("a"),
            Clause::And(vec![term("b"), term("c")]),
        ]);
        assert_eq!(nested, Clause::And(vec![term("a"), term("b"), term("c")]));
    }

    #[test]
    fn and_single_element_unwraps() {
        assert_eq!(Clause::and(vec![term("a")]), term("a"));
    }

    #[test]
    fn or_flattens_nested() {
        let nested = Clause::or(vec![
            term("a"),
            Clause::Or(vec![term("b"), term("c")]),
        ]);
        assert_eq!(nested, Clause::Or(vec![term("a"), term("b"), term("c")]));
    }

    #[test]
    fn visitor_dispatches_every_node() {
        /// Visitor counting node kinds.
        #[derive(Default)]
        struct Counter {
            /// Terminal nodes seen.
            terminals: usize,
            /// Not nodes seen.
            nots: usize,
        }

        impl ClauseVisitor for Counter {
            fn visit_terminal(&mut self, _terminal: &TerminalClause) {
                self.terminals += 1;
            }

            fn visit_not(&mut self, inner: &Clause) {
                self.nots += 1;
                inner.accept(self);
            }
        }

        let tree = Clause::And(vec![
            term("a"),
            Clause::not(Clause::Or(vec![term("b"), term("c")])),
        ]);

        let mut counter = Counter::default();
        tree.accept(&mut counter);
        assert_eq!(counter.terminals, 3);
        assert_eq!(counter.nots, 1);
    }

    #[test]
    fn terminals_walks_left_to_right() {
        let tree = Clause::And(vec![
            term("a"),
            Clause::not(Clause::Or(vec![term("b"), term("c")])),
        ]);
        let fields: Vec<&str> = tree
            .terminals()
            .iter()
            .map(|t| t.field.as_str())
            .collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn query_string_round_trips_structure() {
        let tree = Clause::And(vec![
            Clause::terminal("priority", Operator::Equals, Operand::text("high")),
            Clause::not(Clause::Or(vec![
                Clause::terminal("status", Operator::In, Operand::Multi(vec![
                    Operand::text("open"),
                    Operand::text("reopened"),
                ])),
                Clause::terminal("assignee", Operator::Is, Operand::Empty),
            ])),
        ]);
        assert_eq!(
            tree.to_query_string(),
            "priority = high AND NOT (status IN (open, reopened) OR assignee IS EMPTY)"
        );
    }

    #[test]
    fn changed_renders_without_operand() {
        let clause = Clause::terminal("status", Operator::Changed, Operand::Empty);
        assert_eq!(clause.to_query_string(), "status CHANGED");
    }

    #[test]
    fn tree_display() {
        let tree = Clause::not(term("a"));
        let rendered = tree.to_string();
        assert!(rendered.starts_with("Not\n"));
        assert!(rendered.contains("Terminal(a = x)"));
    }
}
