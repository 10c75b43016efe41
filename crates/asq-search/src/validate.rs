//! Clause validators.
//!
//! Validators check one terminal clause and report problems as a
//! [`MessageSet`]. They never throw for expected domain conditions — an
//! unsupported operator or a missing value is a message, not a panic.
//! Composition is strictly sequential: a stage that produces errors stops
//! the chain, and messages already produced are never removed.

use std::{collections::HashSet, sync::Arc};

use asq_query::{Operand, Operator, TerminalClause};

use crate::{
    context::RequestContext,
    literal::QueryLiteral,
    message::{Message, MessageSet, Severity},
    operand::OperandResolver,
    resolver::NameLookup,
};

/// Validates one terminal clause for one request.
pub trait ClauseValidator {
    /// Validates `clause`, returning an empty set when it is acceptable.
    fn validate(&self, ctx: &RequestContext, clause: &TerminalClause) -> MessageSet;
}

/// Rejects operators outside a whitelist built from operator classes.
pub struct SupportedOperatorsValidator {
    /// The union of the accepted operator classes.
    supported: HashSet<Operator>,
}

impl SupportedOperatorsValidator {
    /// Creates a validator accepting the union of the given classes.
    pub fn from_classes(classes: &[&[Operator]]) -> Self {
        Self {
            supported: crate::info::operators_from_classes(classes),
        }
    }

    /// Creates a validator accepting exactly the given operators.
    pub fn new(supported: HashSet<Operator>) -> Self {
        Self { supported }
    }
}

impl ClauseValidator for SupportedOperatorsValidator {
    fn validate(&self, _ctx: &RequestContext, clause: &TerminalClause) -> MessageSet {
        let mut messages = MessageSet::new();
        if !self.supported.contains(&clause.operator) {
            messages.push(Message::error(
                "operator-not-supported",
                vec![clause.operator.to_string(), clause.field.clone()],
            ));
        }
        messages
    }
}

/// Checks that every resolved literal refers to an existing entity.
///
/// Failures for values typed directly and values produced by a function use
/// distinct message keys, so users can tell the two apart. Severity is
/// configurable: soft fields (such as the assigned user) warn, everything
/// else errors.
pub struct ValuesExistValidator {
    /// Resolves the clause's operand to literals.
    operands: Arc<OperandResolver>,
    /// Existence lookup for this clause's domain type.
    lookup: Arc<dyn NameLookup>,
    /// Severity of an existence failure.
    severity: Severity,
}

impl ValuesExistValidator {
    /// Creates an existence validator reporting errors.
    pub fn new(operands: Arc<OperandResolver>, lookup: Arc<dyn NameLookup>) -> Self {
        Self::with_severity(operands, lookup, Severity::Error)
    }

    /// Creates an existence validator with an explicit failure severity.
    pub fn with_severity(
        operands: Arc<OperandResolver>,
        lookup: Arc<dyn NameLookup>,
        severity: Severity,
    ) -> Self {
        Self {
            operands,
            lookup,
            severity,
        }
    }

    /// Returns true when a literal refers to something that exists.
    fn exists(&self, literal: &QueryLiteral) -> bool {
        if let Some(id) = literal.int_value() {
            return self.lookup.id_exists(id) || self.lookup.name_exists(&id.to_string());
        }
        if let Some(name) = literal.string_value() {
            if self.lookup.name_exists(name) {
                return true;
            }
            // Names that look numeric may be ids written as text.
            return name
                .parse::<i64>()
                .map(|id| self.lookup.id_exists(id))
                .unwrap_or(false);
        }
        // Explicit empty literal: emptiness has no existence semantics; the
        // operator whitelist decides whether EMPTY is acceptable here.
        true
    }
}

impl ClauseValidator for ValuesExistValidator {
    fn validate(&self, ctx: &RequestContext, clause: &TerminalClause) -> MessageSet {
        let mut messages = MessageSet::new();

        for literal in self.operands.resolve(ctx, &clause.operand, clause) {
            if self.exists(&literal) {
                continue;
            }

            let message = if let Operand::Function(function) = &literal.source {
                Message::new(
                    self.severity,
                    "value-from-function-does-not-exist",
                    vec![function.name.clone(), clause.field.clone()],
                )
            } else {
                Message::new(
                    self.severity,
                    "value-does-not-exist",
                    vec![
                        literal.raw().unwrap_or_default(),
                        clause.field.clone(),
                    ],
                )
            };
            messages.push(message);
        }

        messages
    }
}

/// Runs validators in strict sequence, stopping after the first stage that
/// produces errors. Messages from every stage that ran are kept.
pub struct SequentialClauseValidator {
    /// The stages, in order.
    stages: Vec<Arc<dyn ClauseValidator>>,
}

impl SequentialClauseValidator {
    /// Creates a sequential validator.
    pub fn new(stages: Vec<Arc<dyn ClauseValidator>>) -> Self {
        Self { stages }
    }
}

impl ClauseValidator for SequentialClauseValidator {
    fn validate(&self, ctx: &RequestContext, clause: &TerminalClause) -> MessageSet {
        let mut messages = MessageSet::new();

        for stage in &self.stages {
            let produced = stage.validate(ctx, clause);
            let stop = produced.has_errors();
            messages.extend(produced);
            if stop {
                break;
            }
        }

        messages
    }
}

/// The composite validator for user-valued clauses: operator whitelist
/// first, value existence only when no errors were produced.
pub fn user_clause_validator(
    operands: Arc<OperandResolver>,
    lookup: Arc<dyn NameLookup>,
    severity: Severity,
) -> SequentialClauseValidator {
    SequentialClauseValidator::new(vec![
        Arc::new(SupportedOperatorsValidator::from_classes(&[
            asq_query::class::EQUALITY,
            asq_query::class::LIST,
            asq_query::class::EMPTY,
        ])),
        Arc::new(ValuesExistValidator::with_severity(
            operands, lookup, severity,
        )),
    ])
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use asq_query::class;

    use super::*;

    /// Existence lookup fixture that counts calls and knows fixed names.
    struct SpyLookup {
        /// Known entity names.
        names: Vec<&'static str>,
        /// Number of lookup calls observed.
        calls: Cell<usize>,
    }

    impl SpyLookup {
        fn knowing(names: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                names,
                calls: Cell::new(0),
            })
        }
    }

    impl NameLookup for SpyLookup {
        fn id_exists(&self, _id: i64) -> bool {
            self.calls.set(self.calls.get() + 1);
            false
        }

        fn ids_from_name(&self, name: &str) -> Vec<i64> {
            self.calls.set(self.calls.get() + 1);
            if self.names.contains(&name) {
                vec![1]
            } else {
                vec![]
            }
        }
    }

    fn terminal(operator: Operator, operand: Operand) -> TerminalClause {
        TerminalClause::new("assignee", operator, operand)
    }

    #[test]
    fn operator_whitelist_accepts_class_members() {
        let validator = SupportedOperatorsValidator::from_classes(&[class::EQUALITY]);
        let ctx = RequestContext::new();
        let clause = terminal(Operator::Equals, Operand::text("a"));
        assert!(validator.validate(&ctx, &clause).is_empty());
    }

    #[test]
    fn operator_whitelist_rejects_outsiders() {
        let validator = SupportedOperatorsValidator::from_classes(&[class::EQUALITY]);
        let ctx = RequestContext::new();
        let clause = terminal(Operator::Like, Operand::text("a"));

        let messages = validator.validate(&ctx, &clause);
        assert!(messages.has_errors());
        let message = &messages.messages()[0];
        assert_eq!(message.key, "operator-not-supported");
        assert_eq!(message.args, vec!["~".to_string(), "assignee".to_string()]);
    }

    #[test]
    fn existing_values_pass() {
        let lookup = SpyLookup::knowing(vec!["admin"]);
        let validator =
            ValuesExistValidator::new(Arc::new(OperandResolver::default()), lookup);
        let ctx = RequestContext::new();
        let clause = terminal(Operator::Equals, Operand::text("admin"));
        assert!(validator.validate(&ctx, &clause).is_empty());
    }

    #[test]
    fn missing_value_reports_with_literal_key() {
        let lookup = SpyLookup::knowing(vec![]);
        let validator =
            ValuesExistValidator::new(Arc::new(OperandResolver::default()), lookup);
        let ctx = RequestContext::new();
        let clause = terminal(Operator::Equals, Operand::text("ghost"));

        let messages = validator.validate(&ctx, &clause);
        assert!(messages.has_errors());
        let message = &messages.messages()[0];
        assert_eq!(message.key, "value-does-not-exist");
        assert_eq!(message.args, vec!["ghost".to_string(), "assignee".to_string()]);
    }

    #[test]
    fn function_sourced_failure_uses_its_own_key() {
        use crate::operand::{FunctionHandler, FunctionRegistry};
        use asq_query::FunctionOperand;

        /// Function returning one unknown user.
        struct Ghost;

        impl FunctionHandler for Ghost {
            fn name(&self) -> &str {
                "ghostUser"
            }

            fn validate(
                &self,
                _ctx: &RequestContext,
                _function: &FunctionOperand,
                _clause: &TerminalClause,
            ) -> MessageSet {
                MessageSet::new()
            }

            fn resolve(
                &self,
                _ctx: &RequestContext,
                function: &FunctionOperand,
                _clause: &TerminalClause,
            ) -> Vec<QueryLiteral> {
                vec![QueryLiteral::of_text(
                    Operand::Function(function.clone()),
                    "ghost",
                )]
            }
        }

        let mut registry = FunctionRegistry::new();
        registry.register(Arc::new(Ghost));
        let resolver = Arc::new(OperandResolver::new(registry));

        let lookup = SpyLookup::knowing(vec![]);
        let validator = ValuesExistValidator::new(resolver, lookup);
        let ctx = RequestContext::new();
        let clause = terminal(Operator::Equals, Operand::function("ghostUser", vec![]));

        let messages = validator.validate(&ctx, &clause);
        let message = &messages.messages()[0];
        assert_eq!(message.key, "value-from-function-does-not-exist");
        assert_eq!(
            message.args,
            vec!["ghostUser".to_string(), "assignee".to_string()]
        );
    }

    #[test]
    fn severity_is_configurable() {
        let lookup = SpyLookup::knowing(vec![]);
        let validator = ValuesExistValidator::with_severity(
            Arc::new(OperandResolver::default()),
            lookup,
            Severity::Warning,
        );
        let ctx = RequestContext::new();
        let clause = terminal(Operator::Equals, Operand::text("ghost"));

        let messages = validator.validate(&ctx, &clause);
        assert!(!messages.is_empty());
        assert!(!messages.has_errors());
    }

    #[test]
    fn empty_literals_are_skipped() {
        let lookup = SpyLookup::knowing(vec![]);
        let validator = ValuesExistValidator::new(
            Arc::new(OperandResolver::default()),
            Arc::clone(&lookup) as Arc<dyn NameLookup>,
        );
        let ctx = RequestContext::new();
        let clause = terminal(Operator::Is, Operand::Empty);

        assert!(validator.validate(&ctx, &clause).is_empty());
        assert_eq!(lookup.calls.get(), 0);
    }

    #[test]
    fn composite_short_circuits_on_operator_errors() {
        let lookup = SpyLookup::knowing(vec![]);
        let validator = user_clause_validator(
            Arc::new(OperandResolver::default()),
            Arc::clone(&lookup) as Arc<dyn NameLookup>,
            Severity::Error,
        );
        let ctx = RequestContext::new();
        // LIKE is outside the user whitelist; the existence check (which
        // would also fail) must never run.
        let clause = terminal(Operator::Like, Operand::text("ghost"));

        let messages = validator.validate(&ctx, &clause);
        assert!(messages.has_errors());
        assert_eq!(messages.messages().len(), 1);
        assert_eq!(messages.messages()[0].key, "operator-not-supported");
        assert_eq!(lookup.calls.get(), 0);
    }

    #[test]
    fn composite_runs_second_stage_when_first_is_clean() {
        let lookup = SpyLookup::knowing(vec![]);
        let validator = user_clause_validator(
            Arc::new(OperandResolver::default()),
            Arc::clone(&lookup) as Arc<dyn NameLookup>,
            Severity::Error,
        );
        let ctx = RequestContext::new();
        let clause = terminal(Operator::Equals, Operand::text("ghost"));

        let messages = validator.validate(&ctx, &clause);
        assert!(messages.has_errors());
        assert_eq!(messages.messages()[0].key, "value-does-not-exist");
        assert!(lookup.calls.get() > 0);
    }
}
