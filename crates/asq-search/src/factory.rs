//! Clause query factories.
//!
//! A factory translates one validated terminal clause into a Tantivy query
//! against the asset index. Factories only run for clauses that passed
//! validation; an operator a factory cannot handle is still a structured
//! error, never a panic.

use std::{error::Error, fmt, ops::Bound, sync::Arc};

use asq_query::{Operator, TerminalClause};
use tantivy::{
    Term,
    query::{AllQuery, BooleanQuery, EmptyQuery, Occur, PhraseQuery, Query, RangeQuery, TermQuery},
    schema::{Field, IndexRecordOption, Type},
    tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer},
};

use crate::{
    context::RequestContext,
    operand::OperandResolver,
    resolver::IndexedValueSource,
    schema::EMPTY_SENTINEL,
};

/// Error during clause query building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuildError {
    /// Error message.
    pub message: String,
}

impl QueryBuildError {
    /// Creates a query build error.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for QueryBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for QueryBuildError {}

/// Builds a backend query from one validated terminal clause.
pub trait ClauseQueryFactory {
    /// Builds the query. A clause whose values match nothing in the index
    /// yields a query matching nothing, not an error.
    fn build(
        &self,
        ctx: &RequestContext,
        clause: &TerminalClause,
    ) -> Result<Box<dyn Query>, QueryBuildError>;
}

/// Wraps a query so it matches every document except those the inner query
/// matches.
fn negate(inner: Box<dyn Query>) -> Box<dyn Query> {
    let clauses: Vec<(Occur, Box<dyn Query>)> = vec![
        (Occur::Must, Box::new(AllQuery)),
        (Occur::MustNot, inner),
    ];
    Box::new(BooleanQuery::new(clauses))
}

/// Factory for equality-style operators over an entity field: `=`, `!=`,
/// `IN`, `NOT IN`, `IS`, `IS NOT`.
///
/// Raw values go through the index info resolver; the resulting indexed
/// values become term queries. The explicit empty value becomes a term
/// query for the field's empty sentinel, and negated equality excludes
/// records with no value, matching the language's semantics for `!=`.
pub struct EqualityQueryFactory {
    /// The index field queried.
    field: Field,
    /// Resolves operands to literals.
    operands: Arc<OperandResolver>,
    /// Maps literals to indexed values.
    values: Arc<dyn IndexedValueSource>,
}

impl EqualityQueryFactory {
    /// Creates an equality factory for one entity field.
    pub fn new(
        field: Field,
        operands: Arc<OperandResolver>,
        values: Arc<dyn IndexedValueSource>,
    ) -> Self {
        Self {
            field,
            operands,
            values,
        }
    }

    /// Builds the positive form: terms OR the empty sentinel.
    fn positive(&self, terms: &[String], include_empty: bool) -> Box<dyn Query> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = terms
            .iter()
            .map(|value| {
                let term = Term::from_field_text(self.field, value);
                let query: Box<dyn Query> =
                    Box::new(TermQuery::new(term, IndexRecordOption::Basic));
                (Occur::Should, query)
            })
            .collect();

        if include_empty {
            let term = Term::from_field_text(self.field, EMPTY_SENTINEL);
            clauses.push((
                Occur::Should,
                Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
            ));
        }

        if clauses.is_empty() {
            return Box::new(EmptyQuery);
        }
        Box::new(BooleanQuery::new(clauses))
    }
}

impl ClauseQueryFactory for EqualityQueryFactory {
    fn build(
        &self,
        ctx: &RequestContext,
        clause: &TerminalClause,
    ) -> Result<Box<dyn Query>, QueryBuildError> {
        let literals = self.operands.resolve(ctx, &clause.operand, clause);

        let mut terms: Vec<String> = Vec::new();
        let mut has_empty = false;
        for literal in &literals {
            if literal.is_empty() {
                has_empty = true;
            } else {
                terms.extend(self.values.indexed_values(literal));
            }
        }

        match clause.operator {
            Operator::Equals | Operator::In | Operator::Is => {
                Ok(self.positive(&terms, has_empty))
            }
            Operator::NotEquals | Operator::NotIn | Operator::IsNot => {
                let mut clauses: Vec<(Occur, Box<dyn Query>)> =
                    vec![(Occur::Must, Box::new(AllQuery))];
                for value in &terms {
                    let term = Term::from_field_text(self.field, value);
                    clauses.push((
                        Occur::MustNot,
                        Box::new(TermQuery::new(term, IndexRecordOption::Basic)),
                    ));
                }
                // Negated equality never matches records with no value;
                // `IS NOT EMPTY` is the same exclusion with no terms.
                let sentinel = Term::from_field_text(self.field, EMPTY_SENTINEL);
                clauses.push((
                    Occur::MustNot,
                    Box::new(TermQuery::new(sentinel, IndexRecordOption::Basic)),
                ));
                Ok(Box::new(BooleanQuery::new(clauses)))
            }
            other => Err(QueryBuildError::new(format!(
                "operator {other} is not an equality operator"
            ))),
        }
    }
}

/// Factory for text-match operators (`~`, `!~`) over tokenized fields.
///
/// A clause over a concrete text field searches that field; the cross-field
/// pseudo-field passes every text field, and the clause matches when any of
/// them does.
pub struct TextQueryFactory {
    /// The tokenized fields searched.
    fields: Vec<Field>,
    /// Resolves operands to literals.
    operands: Arc<OperandResolver>,
    /// Analyzer matching the index-side tokenization.
    analyzer: TextAnalyzer,
}

impl TextQueryFactory {
    /// Creates a text factory over one or more tokenized fields.
    pub fn new(fields: Vec<Field>, operands: Arc<OperandResolver>) -> Self {
        let analyzer = TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .build();
        Self {
            fields,
            operands,
            analyzer,
        }
    }

    /// Tokenizes text the way the index side does.
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut analyzer = self.analyzer.clone();
        let mut stream = analyzer.token_stream(text);
        let mut tokens = Vec::new();
        while let Some(token) = stream.next() {
            tokens.push(token.text.clone());
        }
        tokens
    }

    /// Builds a term or phrase query for one field.
    fn field_query(&self, field: Field, tokens: &[String]) -> Box<dyn Query> {
        if tokens.len() == 1 {
            let term = Term::from_field_text(field, &tokens[0]);
            return Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
        }
        let terms: Vec<Term> = tokens
            .iter()
            .map(|token| Term::from_field_text(field, token))
            .collect();
        Box::new(PhraseQuery::new(terms))
    }

    /// Builds the positive match across every configured field.
    fn positive(&self, ctx: &RequestContext, clause: &TerminalClause) -> Box<dyn Query> {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();

        for literal in self.operands.resolve(ctx, &clause.operand, clause) {
            let Some(raw) = literal.raw() else {
                continue;
            };
            let tokens = self.tokenize(&raw);
            if tokens.is_empty() {
                continue;
            }
            for &field in &self.fields {
                clauses.push((Occur::Should, self.field_query(field, &tokens)));
            }
        }

        if clauses.is_empty() {
            return Box::new(EmptyQuery);
        }
        Box::new(BooleanQuery::new(clauses))
    }
}

impl ClauseQueryFactory for TextQueryFactory {
    fn build(
        &self,
        ctx: &RequestContext,
        clause: &TerminalClause,
    ) -> Result<Box<dyn Query>, QueryBuildError> {
        match clause.operator {
            Operator::Like => Ok(self.positive(ctx, clause)),
            Operator::NotLike => Ok(negate(self.positive(ctx, clause))),
            other => Err(QueryBuildError::new(format!(
                "operator {other} is not a text operator"
            ))),
        }
    }
}

/// Factory for relational operators (`<`, `<=`, `>`, `>=`) over numeric
/// fast fields.
pub struct RelationalQueryFactory {
    /// The numeric field queried.
    field: Field,
    /// The index name of the numeric field, required to build range queries.
    field_name: String,
    /// Resolves operands to literals.
    operands: Arc<OperandResolver>,
}

impl RelationalQueryFactory {
    /// Creates a relational factory for one numeric field.
    pub fn new(field: Field, field_name: impl Into<String>, operands: Arc<OperandResolver>) -> Self {
        Self {
            field,
            field_name: field_name.into(),
            operands,
        }
    }
}

impl ClauseQueryFactory for RelationalQueryFactory {
    fn build(
        &self,
        ctx: &RequestContext,
        clause: &TerminalClause,
    ) -> Result<Box<dyn Query>, QueryBuildError> {
        let literals = self.operands.resolve(ctx, &clause.operand, clause);
        let literal = literals.first().ok_or_else(|| {
            QueryBuildError::new(format!("'{}' requires a value to compare to", clause.field))
        })?;

        let value = literal
            .int_value()
            .or_else(|| literal.string_value().and_then(|text| text.parse().ok()))
            .ok_or_else(|| {
                QueryBuildError::new(format!("'{}' requires a numeric value", clause.field))
            })?;

        let term = Term::from_field_i64(self.field, value);
        let (lower, upper) = match clause.operator {
            Operator::GreaterThan => (Bound::Excluded(term), Bound::Unbounded),
            Operator::GreaterThanEquals => (Bound::Included(term), Bound::Unbounded),
            Operator::LessThan => (Bound::Unbounded, Bound::Excluded(term)),
            Operator::LessThanEquals => (Bound::Unbounded, Bound::Included(term)),
            other => {
                return Err(QueryBuildError::new(format!(
                    "operator {other} is not a relational operator"
                )));
            }
        };

        Ok(Box::new(RangeQuery::new_term_bounds(
            self.field_name.clone(),
            Type::I64,
            &lower,
            &upper,
        )))
    }
}

#[cfg(test)]
mod tests {
    use asq_query::Operand;

    use super::*;
    use crate::{literal::QueryLiteral, schema::AssetSchema};

    /// Value source fixture mapping known names to fixed ids.
    struct FixedValues;

    impl IndexedValueSource for FixedValues {
        fn indexed_values(&self, literal: &QueryLiteral) -> Vec<String> {
            match literal.raw().as_deref() {
                Some("open") => vec!["1".to_string()],
                Some("closed") => vec!["2".to_string()],
                _ => Vec::new(),
            }
        }
    }

    fn equality() -> (EqualityQueryFactory, RequestContext) {
        let schema = AssetSchema::new();
        let factory = EqualityQueryFactory::new(
            schema.status,
            Arc::new(OperandResolver::default()),
            Arc::new(FixedValues),
        );
        (factory, RequestContext::new())
    }

    fn terminal(operator: Operator, operand: Operand) -> TerminalClause {
        TerminalClause::new("status", operator, operand)
    }

    #[test]
    fn equals_builds_term_query() {
        let (factory, ctx) = equality();
        let clause = terminal(Operator::Equals, Operand::text("open"));
        let query = factory.build(&ctx, &clause).unwrap();
        let rendered = format!("{query:?}");
        assert!(rendered.contains("TermQuery"));
    }

    #[test]
    fn in_list_builds_disjunction() {
        let (factory, ctx) = equality();
        let clause = terminal(
            Operator::In,
            Operand::Multi(vec![Operand::text("open"), Operand::text("closed")]),
        );
        let query = factory.build(&ctx, &clause).unwrap();
        assert!(format!("{query:?}").contains("BooleanQuery"));
    }

    #[test]
    fn unknown_value_matches_nothing() {
        let (factory, ctx) = equality();
        let clause = terminal(Operator::Equals, Operand::text("nonesuch"));
        let query = factory.build(&ctx, &clause).unwrap();
        assert!(format!("{query:?}").contains("EmptyQuery"));
    }

    #[test]
    fn is_empty_queries_the_sentinel() {
        let (factory, ctx) = equality();
        let clause = terminal(Operator::Is, Operand::Empty);
        let query = factory.build(&ctx, &clause).unwrap();
        assert!(format!("{query:?}").contains("TermQuery"));
    }

    #[test]
    fn not_equals_excludes_terms_and_empties() {
        let (factory, ctx) = equality();
        let clause = terminal(Operator::NotEquals, Operand::text("open"));
        let query = factory.build(&ctx, &clause).unwrap();
        let rendered = format!("{query:?}");
        assert!(rendered.contains("AllQuery"));
        assert!(rendered.contains("MustNot"));
    }

    #[test]
    fn equality_factory_rejects_foreign_operator() {
        let (factory, ctx) = equality();
        let clause = terminal(Operator::Like, Operand::text("open"));
        assert!(factory.build(&ctx, &clause).is_err());
    }

    fn text_factory(fields: Vec<Field>) -> (TextQueryFactory, RequestContext) {
        (
            TextQueryFactory::new(fields, Arc::new(OperandResolver::default())),
            RequestContext::new(),
        )
    }

    #[test]
    fn like_single_token_builds_term_query() {
        let schema = AssetSchema::new();
        let (factory, ctx) = text_factory(vec![schema.name]);
        let clause = TerminalClause::new("name", Operator::Like, Operand::text("laptop"));
        let query = factory.build(&ctx, &clause).unwrap();
        assert!(format!("{query:?}").contains("TermQuery"));
    }

    #[test]
    fn like_multiple_tokens_builds_phrase_query() {
        let schema = AssetSchema::new();
        let (factory, ctx) = text_factory(vec![schema.name]);
        let clause = TerminalClause::new(
            "name",
            Operator::Like,
            Operand::text("thinkpad docking station"),
        );
        let query = factory.build(&ctx, &clause).unwrap();
        assert!(format!("{query:?}").contains("PhraseQuery"));
    }

    #[test]
    fn cross_field_text_searches_every_field() {
        let schema = AssetSchema::new();
        let (factory, ctx) = text_factory(schema.text_fields().to_vec());
        let clause = TerminalClause::new("text", Operator::Like, Operand::text("laptop"));
        let query = factory.build(&ctx, &clause).unwrap();
        // One Should clause per text field.
        let rendered = format!("{query:?}");
        assert_eq!(rendered.matches("TermQuery").count(), 2);
    }

    #[test]
    fn not_like_wraps_in_exclusion() {
        let schema = AssetSchema::new();
        let (factory, ctx) = text_factory(vec![schema.name]);
        let clause = TerminalClause::new("name", Operator::NotLike, Operand::text("laptop"));
        let query = factory.build(&ctx, &clause).unwrap();
        assert!(format!("{query:?}").contains("AllQuery"));
    }

    #[test]
    fn relational_builds_range_query() {
        let schema = AssetSchema::new();
        let factory =
            RelationalQueryFactory::new(schema.created, "created", Arc::new(OperandResolver::default()));
        let ctx = RequestContext::new();
        let clause = TerminalClause::new(
            "created",
            Operator::GreaterThanEquals,
            Operand::number(1_700_000_000),
        );
        let query = factory.build(&ctx, &clause).unwrap();
        assert!(format!("{query:?}").contains("RangeQuery"));
    }

    #[test]
    fn relational_accepts_numeric_text() {
        let schema = AssetSchema::new();
        let factory =
            RelationalQueryFactory::new(schema.created, "created", Arc::new(OperandResolver::default()));
        let ctx = RequestContext::new();
        let clause = TerminalClause::new(
            "created",
            Operator::LessThan,
            Operand::text("1700000000"),
        );
        assert!(factory.build(&ctx, &clause).is_ok());
    }

    #[test]
    fn relational_rejects_non_numeric_value() {
        let schema = AssetSchema::new();
        let factory =
            RelationalQueryFactory::new(schema.created, "created", Arc::new(OperandResolver::default()));
        let ctx = RequestContext::new();
        let clause =
            TerminalClause::new("created", Operator::LessThan, Operand::text("yesterday"));
        let err = factory.build(&ctx, &clause).unwrap_err();
        assert!(err.message.contains("numeric"));
    }
}
