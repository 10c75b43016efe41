//! The request scope.
//!
//! A [`RequestContext`] is an explicit scope object threaded through
//! validation, resolution, and query building for one logical request. It
//! owns the operand-resolution cache and the searcher cache, making the
//! lifetime and single-threaded ownership visible in type signatures rather
//! than implicit in thread-local storage.
//!
//! The caller opens a context at request start and must call
//! [`RequestContext::close`] on every exit path, including error paths;
//! unclosed contexts hold backend reader/searcher resources.

use std::{cell::RefCell, collections::HashMap};

use asq_query::{Operand, Operator, TerminalClause};

use crate::{literal::QueryLiteral, session::SearcherCache};

/// Cache key for one operand resolution: the operand plus the clause it is
/// being resolved for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperandCacheKey {
    /// The clause's field name.
    field: String,
    /// The clause's operator.
    operator: Operator,
    /// The operand being resolved.
    operand: Operand,
}

impl OperandCacheKey {
    /// Creates a key for resolving `operand` against `clause`.
    pub fn new(operand: &Operand, clause: &TerminalClause) -> Self {
        Self {
            field: clause.field.clone(),
            operator: clause.operator,
            operand: operand.clone(),
        }
    }
}

/// One logical request's scope: the requesting user, the operand-resolution
/// cache, and the searcher-session cache.
#[derive(Default)]
pub struct RequestContext {
    /// The requesting user, if authenticated.
    user: Option<String>,
    /// Memoized operand resolutions.
    operand_cache: RefCell<HashMap<OperandCacheKey, Vec<QueryLiteral>>>,
    /// Cached searcher sessions.
    searchers: SearcherCache,
}

impl RequestContext {
    /// Creates an anonymous request context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request context for a named user.
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..Self::default()
        }
    }

    /// The requesting user, if any.
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// The searcher-session cache for this request.
    pub fn searchers(&self) -> &SearcherCache {
        &self.searchers
    }

    /// Returns the cached resolution for `key`, if one exists.
    pub fn cached_literals(&self, key: &OperandCacheKey) -> Option<Vec<QueryLiteral>> {
        self.operand_cache.borrow().get(key).cloned()
    }

    /// Stores a resolution. The cache is populated unconditionally after
    /// the first computation, empty results included.
    pub fn store_literals(&self, key: OperandCacheKey, literals: Vec<QueryLiteral>) {
        self.operand_cache.borrow_mut().insert(key, literals);
    }

    /// Ends the request scope: closes searcher sessions and clears the
    /// operand cache. Safe to call more than once.
    pub fn close(&self) {
        self.searchers.close_sessions();
        self.operand_cache.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause() -> TerminalClause {
        TerminalClause::new("status", Operator::Equals, Operand::text("open"))
    }

    #[test]
    fn user_is_optional() {
        assert_eq!(RequestContext::new().user(), None);
        assert_eq!(RequestContext::for_user("admin").user(), Some("admin"));
    }

    #[test]
    fn literal_cache_round_trip() {
        let ctx = RequestContext::new();
        let clause = clause();
        let key = OperandCacheKey::new(&clause.operand, &clause);

        assert!(ctx.cached_literals(&key).is_none());
        ctx.store_literals(
            key.clone(),
            vec![QueryLiteral::of_text(clause.operand.clone(), "open")],
        );
        assert_eq!(ctx.cached_literals(&key).unwrap().len(), 1);
    }

    #[test]
    fn empty_results_are_cached_too() {
        let ctx = RequestContext::new();
        let clause = clause();
        let key = OperandCacheKey::new(&clause.operand, &clause);

        ctx.store_literals(key.clone(), vec![]);
        assert_eq!(ctx.cached_literals(&key), Some(vec![]));
    }

    #[test]
    fn key_distinguishes_clauses() {
        let first = clause();
        let second = TerminalClause::new("assignee", Operator::Equals, Operand::text("open"));

        let ctx = RequestContext::new();
        ctx.store_literals(OperandCacheKey::new(&first.operand, &first), vec![]);
        assert!(
            ctx.cached_literals(&OperandCacheKey::new(&second.operand, &second))
                .is_none()
        );
    }

    #[test]
    fn close_clears_the_operand_cache() {
        let ctx = RequestContext::new();
        let clause = clause();
        let key = OperandCacheKey::new(&clause.operand, &clause);
        ctx.store_literals(key.clone(), vec![]);

        ctx.close();
        assert!(ctx.cached_literals(&key).is_none());

        // Closing again is a no-op.
        ctx.close();
    }
}
