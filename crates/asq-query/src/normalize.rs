//! De Morgan normalization.
//!
//! Rewrites a clause tree into an equivalent tree without `Not` nodes by
//! pushing negation down to terminal operators and flipping And/Or along the
//! way. The rewrite is a pure function over immutable trees: the input is
//! never mutated and the output shares no nodes with it.

use crate::clause::{Clause, TerminalClause};

/// Returns an equivalent tree with negation pushed down to the terminals.
///
/// - `Not(Terminal)` becomes the terminal with its operator negated.
/// - `Not(And(..))` becomes `Or` of negated children; `Not(Or(..))` the dual.
/// - `Not(Not(x))` collapses to `normalize(x)`.
/// - `And`/`Or` recurse into their children, preserving shape.
///
/// Operators with no complement in the closed operator set (`CHANGED` and
/// the history predicates) keep their `Not` wrapper: totality over every
/// legal tree shape wins over eliminating the node.
pub fn normalize(clause: &Clause) -> Clause {
    match clause {
        Clause::Terminal(terminal) => Clause::Terminal(terminal.clone()),
        Clause::And(children) => Clause::And(children.iter().map(normalize).collect()),
        Clause::Or(children) => Clause::Or(children.iter().map(normalize).collect()),
        Clause::Not(inner) => normalize_not(inner),
    }
}

/// Normalizes `Not(inner)` by case analysis on the inner node.
fn normalize_not(inner: &Clause) -> Clause {
    match inner {
        Clause::Terminal(terminal) => negate_terminal(terminal),
        Clause::And(children) => Clause::Or(children.iter().map(normalize_not).collect()),
        Clause::Or(children) => Clause::And(children.iter().map(normalize_not).collect()),
        // Double negation: two Nots cancel, then normalize what remains.
        Clause::Not(next) => normalize(next),
    }
}

/// Negates a terminal clause through the operator-negation table.
fn negate_terminal(terminal: &TerminalClause) -> Clause {
    match terminal.operator.negation() {
        Some(negated) => Clause::Terminal(TerminalClause::new(
            terminal.field.clone(),
            negated,
            terminal.operand.clone(),
        )),
        None => Clause::not(Clause::Terminal(terminal.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{operand::Operand, operator::Operator};

    fn lt(field: &str) -> Clause {
        Clause::terminal(field, Operator::LessThan, Operand::number(2))
    }

    fn eq(field: &str) -> Clause {
        Clause::terminal(field, Operator::Equals, Operand::number(1))
    }

    #[test]
    fn terminal_passes_through() {
        assert_eq!(normalize(&eq("a")), eq("a"));
    }

    #[test]
    fn not_terminal_negates_operator() {
        let input = Clause::not(eq("a"));
        assert_eq!(
            normalize(&input),
            Clause::terminal("a", Operator::NotEquals, Operand::number(1))
        );
    }

    #[test]
    fn double_negation_eliminated() {
        let input = Clause::not(Clause::not(lt("f")));
        assert_eq!(normalize(&input), lt("f"));
    }

    #[test]
    fn triple_negation_reduces_to_single() {
        let input = Clause::not(Clause::not(Clause::not(lt("f"))));
        assert_eq!(
            normalize(&input),
            Clause::terminal("f", Operator::GreaterThanEquals, Operand::number(2))
        );
    }

    #[test]
    fn de_morgan_over_and() {
        let input = Clause::not(Clause::And(vec![eq("a"), lt("b")]));
        assert_eq!(
            normalize(&input),
            Clause::Or(vec![
                Clause::terminal("a", Operator::NotEquals, Operand::number(1)),
                Clause::terminal("b", Operator::GreaterThanEquals, Operand::number(2)),
            ])
        );
    }

    #[test]
    fn de_morgan_over_or() {
        let input = Clause::not(Clause::Or(vec![eq("a"), eq("b")]));
        assert_eq!(
            normalize(&input),
            Clause::And(vec![
                Clause::terminal("a", Operator::NotEquals, Operand::number(1)),
                Clause::terminal("b", Operator::NotEquals, Operand::number(1)),
            ])
        );
    }

    #[test]
    fn nested_negations_collapse() {
        // NOT (a = 1 AND NOT b < 2) => a != 1 OR b < 2
        let input = Clause::not(Clause::And(vec![eq("a"), Clause::not(lt("b"))]));
        assert_eq!(
            normalize(&input),
            Clause::Or(vec![
                Clause::terminal("a", Operator::NotEquals, Operand::number(1)),
                lt("b"),
            ])
        );
    }

    #[test]
    fn idempotent() {
        let trees = [
            eq("a"),
            Clause::not(eq("a")),
            Clause::not(Clause::And(vec![eq("a"), Clause::not(Clause::Or(vec![
                lt("b"),
                eq("c"),
            ]))])),
            Clause::not(Clause::not(Clause::not(lt("f")))),
        ];
        for tree in trees {
            let once = normalize(&tree);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn non_negatable_operator_keeps_not() {
        let changed = Clause::terminal("status", Operator::Changed, Operand::Empty);
        let input = Clause::not(changed.clone());
        assert_eq!(normalize(&input), Clause::not(changed));
    }

    #[test]
    fn and_or_without_not_preserve_shape() {
        let input = Clause::And(vec![eq("a"), Clause::Or(vec![eq("b"), lt("c")])]);
        assert_eq!(normalize(&input), input);
    }
}
