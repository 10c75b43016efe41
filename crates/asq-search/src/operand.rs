//! Operand resolution.
//!
//! Resolves an operand into the sequence of concrete [`QueryLiteral`]s it
//! stands for. Dispatch is an exhaustive match over the closed operand type,
//! so there is no "unknown operand kind" fallback to fall through: every
//! variant is handled or the crate does not compile.
//!
//! Function operands resolve through a registry of named handlers. Results
//! are memoized in the request context per (operand, clause), so a function
//! handler runs at most once per request for the same operand and clause.

use std::{collections::HashMap, sync::Arc};

use asq_query::{FunctionOperand, Operand, TerminalClause};

use crate::{
    context::{OperandCacheKey, RequestContext},
    literal::QueryLiteral,
    message::{Message, MessageSet},
};

/// A registered query function such as `currentUser()`.
pub trait FunctionHandler {
    /// The function's name, matched case-insensitively.
    fn name(&self) -> &str;

    /// Validates a use of the function in a clause.
    fn validate(
        &self,
        ctx: &RequestContext,
        function: &FunctionOperand,
        clause: &TerminalClause,
    ) -> MessageSet;

    /// Resolves the function to its literal values.
    fn resolve(
        &self,
        ctx: &RequestContext,
        function: &FunctionOperand,
        clause: &TerminalClause,
    ) -> Vec<QueryLiteral>;
}

/// Registry of function handlers, keyed by lowercased name.
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    /// Registered handlers.
    handlers: HashMap<String, Arc<dyn FunctionHandler>>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under its own name. A later registration with
    /// the same name replaces the earlier one.
    pub fn register(&mut self, handler: Arc<dyn FunctionHandler>) {
        self.handlers
            .insert(handler.name().to_lowercase(), handler);
    }

    /// Looks up a handler by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn FunctionHandler>> {
        self.handlers.get(&name.to_lowercase())
    }
}

/// Resolves operands to literal values, memoized per request.
#[derive(Default, Clone)]
pub struct OperandResolver {
    /// The function-handler registry.
    registry: FunctionRegistry,
}

impl OperandResolver {
    /// Creates a resolver over a function registry.
    pub fn new(registry: FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Resolves `operand` to its literal values for `clause`.
    ///
    /// The first resolution of a given (operand, clause) pair within a
    /// request computes and caches; later resolutions return the cached
    /// values without re-invoking any function handler.
    pub fn resolve(
        &self,
        ctx: &RequestContext,
        operand: &Operand,
        clause: &TerminalClause,
    ) -> Vec<QueryLiteral> {
        let key = OperandCacheKey::new(operand, clause);
        if let Some(cached) = ctx.cached_literals(&key) {
            return cached;
        }

        let literals = self.compute(ctx, operand, clause);
        ctx.store_literals(key, literals.clone());
        literals
    }

    /// Computes a resolution without consulting the cache.
    fn compute(
        &self,
        ctx: &RequestContext,
        operand: &Operand,
        clause: &TerminalClause,
    ) -> Vec<QueryLiteral> {
        match operand {
            Operand::Empty => vec![QueryLiteral::empty(operand.clone())],
            Operand::Single(value) => vec![match value {
                asq_query::SingleValue::Text(text) => {
                    QueryLiteral::of_text(operand.clone(), text.clone())
                }
                asq_query::SingleValue::Number(number) => {
                    QueryLiteral::of_number(operand.clone(), *number)
                }
            }],
            // Lists flatten: the resolution of a list is the concatenation
            // of resolving each element, nested lists included.
            Operand::Multi(children) => children
                .iter()
                .flat_map(|child| self.resolve(ctx, child, clause))
                .collect(),
            Operand::Function(function) => match self.registry.get(&function.name) {
                Some(handler) => handler.resolve(ctx, function, clause),
                // Unregistered functions resolve to nothing; validate()
                // reports them.
                None => Vec::new(),
            },
        }
    }

    /// Validates `operand` for `clause`, delegating function operands to
    /// their handler's own validation.
    pub fn validate(
        &self,
        ctx: &RequestContext,
        operand: &Operand,
        clause: &TerminalClause,
    ) -> MessageSet {
        match operand {
            Operand::Empty | Operand::Single(_) => MessageSet::new(),
            Operand::Multi(children) => {
                let mut messages = MessageSet::new();
                for child in children {
                    messages.extend(self.validate(ctx, child, clause));
                }
                messages
            }
            Operand::Function(function) => match self.registry.get(&function.name) {
                Some(handler) => handler.validate(ctx, function, clause),
                None => {
                    let mut messages = MessageSet::new();
                    messages.push(Message::error(
                        "illegal-function",
                        vec![function.name.clone()],
                    ));
                    messages
                }
            },
        }
    }
}
