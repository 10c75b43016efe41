//! Search handlers and the clause-name registry.
//!
//! A [`ClauseHandler`] bundles everything the search layer knows about one
//! clause name: its metadata, query factory, validator, permission gate,
//! context factory, and (optionally) a value-suggestion generator. A
//! [`SearchHandler`] binds one field searcher to one or more such clause
//! registrations, and the [`SearchHandlerRegistry`] exposes them by clause
//! name to the orchestration layer.
//!
//! Handlers are constructed once at startup. A field whose searcher fails
//! to initialize is a fatal configuration error, not a per-request one.

use std::{collections::HashMap, sync::Arc};

use asq_query::{Clause, ClauseVisitor, TerminalClause, class};
use tantivy::query::{AllQuery, BooleanQuery, Occur, Query};
use tracing::debug;

use crate::{
    context::RequestContext,
    error::SearchError,
    factory::{
        ClauseQueryFactory, EqualityQueryFactory, QueryBuildError, RelationalQueryFactory,
        TextQueryFactory,
    },
    info::{ClauseInformation, ClauseNames, DataType, operators_from_classes},
    message::{Message, MessageSet, Severity},
    operand::OperandResolver,
    resolver::{IndexInfoResolver, IndexedValueSource, NameLookup, StaticCatalog, VerbatimValues},
    schema::AssetSchema,
    suggest::{StaticValuesGenerator, ValuesGenerator},
    validate::{ClauseValidator, SupportedOperatorsValidator, user_clause_validator},
};

/// Gates whether a clause is usable by a given user.
pub trait PermissionChecker {
    /// Returns true when `user` may search with this clause.
    fn can_view(&self, user: Option<&str>) -> bool;
}

/// Permission gate that admits everyone.
pub struct Anyone;

impl PermissionChecker for Anyone {
    fn can_view(&self, _user: Option<&str>) -> bool {
        true
    }
}

/// The catalog scope a clause applies in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseContext {
    /// Catalog names the clause is scoped to. Empty means global.
    pub catalogs: Vec<String>,
}

impl ClauseContext {
    /// The global (unscoped) context.
    pub fn global() -> Self {
        Self {
            catalogs: Vec::new(),
        }
    }
}

/// Computes the context a clause applies in.
pub trait ClauseContextFactory {
    /// The context for one use of the clause.
    fn generate(&self, ctx: &RequestContext, clause: &TerminalClause) -> ClauseContext;
}

/// Context factory for clauses with no catalog scoping.
pub struct GlobalContextFactory;

impl ClauseContextFactory for GlobalContextFactory {
    fn generate(&self, _ctx: &RequestContext, _clause: &TerminalClause) -> ClauseContext {
        ClauseContext::global()
    }
}

/// Everything registered for one clause name.
pub struct ClauseHandler {
    /// Static clause metadata.
    pub information: Arc<ClauseInformation>,
    /// Builds backend queries for the clause.
    pub factory: Arc<dyn ClauseQueryFactory>,
    /// Validates uses of the clause.
    pub validator: Arc<dyn ClauseValidator>,
    /// Gates visibility per user.
    pub permission: Arc<dyn PermissionChecker>,
    /// Computes the clause's catalog scope.
    pub context_factory: Arc<dyn ClauseContextFactory>,
    /// Suggestion source, when the clause is suggestible.
    pub values: Option<Arc<dyn ValuesGenerator>>,
}

impl ClauseHandler {
    /// Creates a handler for a clause with no value suggestions.
    pub fn new(
        information: Arc<ClauseInformation>,
        factory: Arc<dyn ClauseQueryFactory>,
        validator: Arc<dyn ClauseValidator>,
        permission: Arc<dyn PermissionChecker>,
        context_factory: Arc<dyn ClauseContextFactory>,
    ) -> Self {
        Self {
            information,
            factory,
            validator,
            permission,
            context_factory,
            values: None,
        }
    }

    /// Creates a handler for a suggestible clause.
    pub fn with_values(
        information: Arc<ClauseInformation>,
        factory: Arc<dyn ClauseQueryFactory>,
        validator: Arc<dyn ClauseValidator>,
        permission: Arc<dyn PermissionChecker>,
        context_factory: Arc<dyn ClauseContextFactory>,
        values: Arc<dyn ValuesGenerator>,
    ) -> Self {
        Self {
            values: Some(values),
            ..Self::new(information, factory, validator, permission, context_factory)
        }
    }
}

/// One field's searcher implementation.
pub trait FieldSearcher {
    /// The field this searcher serves, for diagnostics.
    fn field_id(&self) -> &str;
}

/// The stock field searcher over the asset index.
pub struct AssetFieldSearcher {
    /// The served field's identity.
    field_id: String,
}

impl AssetFieldSearcher {
    /// Creates a searcher for the field described by `info`.
    ///
    /// Fails when the metadata identifies no field at all — there is
    /// nothing to search and the registration is misconfigured.
    pub fn new(info: &ClauseInformation) -> Result<Self, SearchError> {
        let field_id = info
            .field_id
            .clone()
            .or_else(|| info.index_field.clone())
            .or_else(|| Some(info.names.primary().to_string()))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SearchError::Handler {
                field: info.names.primary().to_string(),
                message: "no field identity to search".to_string(),
            })?;
        Ok(Self { field_id })
    }
}

impl FieldSearcher for AssetFieldSearcher {
    fn field_id(&self) -> &str {
        &self.field_id
    }
}

/// Creates concrete field searchers; injected so deployments can substitute
/// their own implementations.
pub trait SearcherFactory {
    /// Creates the searcher for one clause registration.
    fn create(&self, info: &ClauseInformation) -> Result<Arc<dyn FieldSearcher>, SearchError>;
}

/// Searcher factory producing [`AssetFieldSearcher`]s.
pub struct DefaultSearcherFactory;

impl SearcherFactory for DefaultSearcherFactory {
    fn create(&self, info: &ClauseInformation) -> Result<Arc<dyn FieldSearcher>, SearchError> {
        Ok(Arc::new(AssetFieldSearcher::new(info)?))
    }
}

/// One searcher bound to its clause registrations.
pub struct SearchHandler {
    /// The searcher implementation.
    pub searcher: Arc<dyn FieldSearcher>,
    /// The clause handlers registered for it.
    pub clauses: Vec<Arc<ClauseHandler>>,
}

/// Builds the search handler for one clause registration.
///
/// Construction is pure composition over the supplied parts; a searcher
/// that fails to initialize propagates as a fatal [`SearchError::Handler`].
pub fn create_handler(
    searcher_factory: &dyn SearcherFactory,
    clause: ClauseHandler,
) -> Result<SearchHandler, SearchError> {
    let searcher = searcher_factory
        .create(&clause.information)
        .map_err(|err| SearchError::Handler {
            field: clause.information.names.primary().to_string(),
            message: err.to_string(),
        })?;
    Ok(SearchHandler {
        searcher,
        clauses: vec![Arc::new(clause)],
    })
}

/// Registry of clause handlers, keyed by every accepted clause name.
#[derive(Default)]
pub struct SearchHandlerRegistry {
    /// Lowercased clause name to handler. Several names may map to the
    /// same handler; different names may map to independent handlers.
    by_name: HashMap<String, Arc<ClauseHandler>>,
}

impl SearchHandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every clause handler of a search handler under all of its
    /// accepted names.
    pub fn register(&mut self, handler: &SearchHandler) {
        for clause in &handler.clauses {
            for name in clause.information.names.all() {
                debug!(name, "registering clause handler");
                self.by_name
                    .insert(name.to_lowercase(), Arc::clone(clause));
            }
        }
    }

    /// Looks up the handler for a clause name, ignoring case.
    pub fn handler_for(&self, name: &str) -> Option<&Arc<ClauseHandler>> {
        self.by_name.get(&name.to_lowercase())
    }

    /// Validates one terminal clause: field known, visible to the user,
    /// operand acceptable, per-field validator satisfied.
    pub fn validate_clause(&self, ctx: &RequestContext, clause: &TerminalClause) -> MessageSet {
        let mut messages = MessageSet::new();

        let Some(handler) = self.handler_for(&clause.field) else {
            messages.push(Message::error("unknown-field", vec![clause.field.clone()]));
            return messages;
        };

        if !handler.permission.can_view(ctx.user()) {
            messages.push(Message::error(
                "field-not-visible",
                vec![clause.field.clone()],
            ));
            return messages;
        }

        messages.extend(handler.validator.validate(ctx, clause));
        messages
    }

    /// Validates every terminal clause of a query tree. Messages accumulate
    /// per clause; warnings do not block other clauses from validating.
    pub fn validate(&self, ctx: &RequestContext, clause: &Clause) -> MessageSet {
        /// Visitor collecting per-terminal validation messages.
        struct Validation<'a> {
            /// The registry validating the clauses.
            registry: &'a SearchHandlerRegistry,
            /// The request being validated for.
            ctx: &'a RequestContext,
            /// Messages accumulated so far.
            messages: MessageSet,
        }

        impl ClauseVisitor for Validation<'_> {
            fn visit_terminal(&mut self, terminal: &TerminalClause) {
                self.messages
                    .extend(self.registry.validate_clause(self.ctx, terminal));
            }
        }

        let mut validation = Validation {
            registry: self,
            ctx,
            messages: MessageSet::new(),
        };
        clause.accept(&mut validation);
        validation.messages
    }

    /// Builds the backend query for one validated terminal clause.
    pub fn build_clause(
        &self,
        ctx: &RequestContext,
        clause: &TerminalClause,
    ) -> Result<Box<dyn Query>, QueryBuildError> {
        let handler = self.handler_for(&clause.field).ok_or_else(|| QueryBuildError {
            message: format!("no handler for field '{}'", clause.field),
        })?;
        handler.factory.build(ctx, clause)
    }

    /// Builds the backend query for a whole validated clause tree.
    pub fn build(
        &self,
        ctx: &RequestContext,
        clause: &Clause,
    ) -> Result<Box<dyn Query>, QueryBuildError> {
        match clause {
            Clause::Terminal(terminal) => self.build_clause(ctx, terminal),
            Clause::And(children) => {
                let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
                for child in children {
                    clauses.push((Occur::Must, self.build(ctx, child)?));
                }
                Ok(Box::new(BooleanQuery::new(clauses)))
            }
            Clause::Or(children) => {
                let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
                for child in children {
                    clauses.push((Occur::Should, self.build(ctx, child)?));
                }
                Ok(Box::new(BooleanQuery::new(clauses)))
            }
            Clause::Not(inner) => {
                let clauses: Vec<(Occur, Box<dyn Query>)> = vec![
                    (Occur::Must, Box::new(AllQuery) as Box<dyn Query>),
                    (Occur::MustNot, self.build(ctx, inner)?),
                ];
                Ok(Box::new(BooleanQuery::new(clauses)))
            }
        }
    }

    /// The catalog scope of one clause, when its field is known.
    pub fn generate_context(
        &self,
        ctx: &RequestContext,
        clause: &TerminalClause,
    ) -> Option<ClauseContext> {
        self.handler_for(&clause.field)
            .map(|handler| handler.context_factory.generate(ctx, clause))
    }

    /// Value suggestions for a clause name. Unknown and non-suggestible
    /// clauses yield nothing.
    pub fn suggest_values(
        &self,
        user: Option<&str>,
        name: &str,
        prefix: &str,
        limit: usize,
    ) -> Vec<String> {
        self.handler_for(name)
            .and_then(|handler| handler.values.as_ref())
            .map(|values| values.suggest(user, prefix, limit))
            .unwrap_or_default()
    }
}

/// One entity-valued field (status, manufacturer, ...) of the standard
/// registry, with its backing catalog.
pub struct EntityField {
    /// Accepted clause names.
    pub names: ClauseNames,
    /// The backend index key.
    pub index_field: String,
    /// The data type of the field's values.
    pub data_type: DataType,
    /// The backing catalog.
    pub catalog: Arc<StaticCatalog>,
}

/// Builds the standard registry over the asset schema: the built-in text,
/// serial, and created clauses plus one equality clause per entity field.
///
/// Fields listed in the configuration's `validation.soft_fields` report
/// existence failures as warnings instead of errors.
pub fn standard_registry(
    schema: &AssetSchema,
    operands: &Arc<OperandResolver>,
    entity_fields: Vec<EntityField>,
    config: &asq_config::Config,
) -> Result<SearchHandlerRegistry, SearchError> {
    let mut registry = SearchHandlerRegistry::new();
    let searcher_factory = DefaultSearcherFactory;

    // Tokenized text clauses: name, description, and the cross-field
    // pseudo-field which maps to no single index field.
    let text_clauses: [(&str, Option<tantivy::schema::Field>); 3] = [
        ("name", Some(schema.name)),
        ("description", Some(schema.description)),
        ("text", None),
    ];
    for (name, field) in text_clauses {
        let fields = match field {
            Some(field) => vec![field],
            None => schema.text_fields().to_vec(),
        };
        let information = Arc::new(ClauseInformation::new(
            ClauseNames::single(name),
            field.map(|_| name.to_string()),
            field.map(|_| name.to_string()),
            operators_from_classes(&[class::LIKE]),
            DataType::Text,
        ));
        let handler = ClauseHandler::new(
            Arc::clone(&information),
            Arc::new(TextQueryFactory::new(fields, Arc::clone(operands))),
            Arc::new(SupportedOperatorsValidator::new(
                information.supported_operators.clone(),
            )),
            Arc::new(Anyone),
            Arc::new(GlobalContextFactory),
        );
        registry.register(&create_handler(&searcher_factory, handler)?);
    }

    // Serial numbers: exact matching on the typed value, nothing to suggest.
    let serial_info = Arc::new(ClauseInformation::new(
        ClauseNames::with_aliases("serial", vec!["serialNumber".to_string()]),
        Some("serial".to_string()),
        Some("serial".to_string()),
        operators_from_classes(&[class::EQUALITY, class::LIST, class::EMPTY]),
        DataType::Text,
    ));
    let serial = ClauseHandler::new(
        Arc::clone(&serial_info),
        Arc::new(EqualityQueryFactory::new(
            schema.serial,
            Arc::clone(operands),
            Arc::new(VerbatimValues),
        )),
        Arc::new(SupportedOperatorsValidator::new(
            serial_info.supported_operators.clone(),
        )),
        Arc::new(Anyone),
        Arc::new(GlobalContextFactory),
    );
    registry.register(&create_handler(&searcher_factory, serial)?);

    // Creation time: relational comparisons over epoch seconds.
    let created_info = Arc::new(ClauseInformation::new(
        ClauseNames::single("created"),
        Some("created".to_string()),
        Some("created".to_string()),
        operators_from_classes(&[class::RELATIONAL]),
        DataType::Date,
    ));
    let created = ClauseHandler::new(
        Arc::clone(&created_info),
        Arc::new(RelationalQueryFactory::new(
            schema.created,
            "created",
            Arc::clone(operands),
        )),
        Arc::new(SupportedOperatorsValidator::new(
            created_info.supported_operators.clone(),
        )),
        Arc::new(Anyone),
        Arc::new(GlobalContextFactory),
    );
    registry.register(&create_handler(&searcher_factory, created)?);

    // Entity fields: equality over catalog-resolved index values, with
    // existence validation and name suggestions.
    for field in entity_fields {
        let index_field = schema.field(&field.index_field).ok_or_else(|| {
            SearchError::Handler {
                field: field.names.primary().to_string(),
                message: format!("no index field named '{}'", field.index_field),
            }
        })?;

        let information = Arc::new(ClauseInformation::new(
            field.names,
            Some(field.index_field.clone()),
            Some(field.index_field.clone()),
            operators_from_classes(&[class::EQUALITY, class::LIST, class::EMPTY]),
            field.data_type,
        ));

        let severity = if config.validation.is_soft_field(information.names.primary()) {
            Severity::Warning
        } else {
            Severity::Error
        };
        let validator = user_clause_validator(
            Arc::clone(operands),
            Arc::clone(&field.catalog) as Arc<dyn NameLookup>,
            severity,
        );
        let values: Arc<dyn IndexedValueSource> =
            Arc::new(IndexInfoResolver::new((*field.catalog).clone()));

        let handler = ClauseHandler::with_values(
            Arc::clone(&information),
            Arc::new(EqualityQueryFactory::new(
                index_field,
                Arc::clone(operands),
                values,
            )),
            Arc::new(validator),
            Arc::new(Anyone),
            Arc::new(GlobalContextFactory),
            Arc::new(StaticValuesGenerator::new(field.catalog.names())),
        );
        registry.register(&create_handler(&searcher_factory, handler)?);
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use asq_query::{Operand, Operator, parse_query};

    use super::*;

    fn catalog(rows: &[(i64, &str)]) -> Arc<StaticCatalog> {
        Arc::new(StaticCatalog::new(
            rows.iter().map(|(id, name)| (*id, name.to_string())).collect(),
        ))
    }

    fn registry() -> SearchHandlerRegistry {
        let schema = AssetSchema::new();
        let operands = Arc::new(OperandResolver::default());
        // The default config marks "assignee" as a soft field.
        standard_registry(
            &schema,
            &operands,
            vec![
                EntityField {
                    names: ClauseNames::with_aliases("status", vec!["state".to_string()]),
                    index_field: "status".to_string(),
                    data_type: DataType::Option,
                    catalog: catalog(&[(1, "Open"), (2, "Closed")]),
                },
                EntityField {
                    names: ClauseNames::single("assignee"),
                    index_field: "assignee".to_string(),
                    data_type: DataType::User,
                    catalog: catalog(&[(10, "admin")]),
                },
            ],
            &asq_config::Config::default(),
        )
        .unwrap()
    }

    fn terminal(field: &str, operator: Operator, operand: Operand) -> TerminalClause {
        TerminalClause::new(field, operator, operand)
    }

    #[test]
    fn lookup_is_case_insensitive_and_alias_aware() {
        let registry = registry();
        assert!(registry.handler_for("STATUS").is_some());
        assert!(registry.handler_for("state").is_some());
        assert!(registry.handler_for("nonesuch").is_none());
    }

    #[test]
    fn aliases_share_one_handler() {
        let registry = registry();
        let by_primary = registry.handler_for("status").unwrap();
        let by_alias = registry.handler_for("state").unwrap();
        assert!(Arc::ptr_eq(by_primary, by_alias));
    }

    #[test]
    fn unknown_field_is_a_validation_error() {
        let registry = registry();
        let ctx = RequestContext::new();
        let clause = terminal("nonesuch", Operator::Equals, Operand::text("x"));

        let messages = registry.validate_clause(&ctx, &clause);
        assert!(messages.has_errors());
        assert_eq!(messages.messages()[0].key, "unknown-field");
    }

    #[test]
    fn valid_clause_validates_clean() {
        let registry = registry();
        let ctx = RequestContext::new();
        let clause = terminal("status", Operator::Equals, Operand::text("Open"));
        assert!(registry.validate_clause(&ctx, &clause).is_empty());
    }

    #[test]
    fn soft_field_failures_warn() {
        let registry = registry();
        let ctx = RequestContext::new();
        let clause = terminal("assignee", Operator::Equals, Operand::text("ghost"));

        let messages = registry.validate_clause(&ctx, &clause);
        assert!(!messages.is_empty());
        assert!(!messages.has_errors());
    }

    #[test]
    fn hard_field_failures_error() {
        let registry = registry();
        let ctx = RequestContext::new();
        let clause = terminal("status", Operator::Equals, Operand::text("ghost"));
        assert!(registry.validate_clause(&ctx, &clause).has_errors());
    }

    #[test]
    fn whole_tree_validation_accumulates_per_clause() {
        let registry = registry();
        let ctx = RequestContext::new();
        let query = parse_query("status = ghost AND nonesuch = 1").unwrap();

        let messages = registry.validate(&ctx, &query.where_clause.unwrap());
        let keys: Vec<&str> = messages.messages().iter().map(|m| m.key).collect();
        assert_eq!(keys, vec!["value-does-not-exist", "unknown-field"]);
    }

    #[test]
    fn builds_query_for_valid_tree() {
        let registry = registry();
        let ctx = RequestContext::new();
        let query = parse_query("status = Open AND (name ~ laptop OR NOT assignee IS EMPTY)")
            .unwrap();

        let built = registry.build(&ctx, &query.where_clause.unwrap()).unwrap();
        let rendered = format!("{built:?}");
        assert!(rendered.contains("BooleanQuery"));
    }

    #[test]
    fn build_fails_for_unknown_field() {
        let registry = registry();
        let ctx = RequestContext::new();
        let clause = Clause::terminal("nonesuch", Operator::Equals, Operand::text("x"));
        assert!(registry.build(&ctx, &clause).is_err());
    }

    #[test]
    fn suggestions_come_from_the_catalog() {
        let registry = registry();
        assert_eq!(registry.suggest_values(None, "status", "o", 10), vec!["Open"]);
        assert_eq!(
            registry.suggest_values(None, "STATE", "", 10),
            vec!["Closed", "Open"]
        );
    }

    #[test]
    fn non_suggestible_clause_suggests_nothing() {
        let registry = registry();
        assert!(registry.suggest_values(None, "serial", "S", 10).is_empty());
        assert!(registry.suggest_values(None, "nonesuch", "", 10).is_empty());
    }

    #[test]
    fn context_defaults_to_global() {
        let registry = registry();
        let ctx = RequestContext::new();
        let clause = terminal("status", Operator::Equals, Operand::text("Open"));
        assert_eq!(
            registry.generate_context(&ctx, &clause),
            Some(ClauseContext::global())
        );
    }

    #[test]
    fn permission_gate_hides_fields() {
        /// Gate admitting only the admin user.
        struct AdminOnly;

        impl PermissionChecker for AdminOnly {
            fn can_view(&self, user: Option<&str>) -> bool {
                user == Some("admin")
            }
        }

        let information = Arc::new(ClauseInformation::new(
            ClauseNames::single("secret"),
            Some("status".to_string()),
            Some("status".to_string()),
            operators_from_classes(&[class::EQUALITY]),
            DataType::Option,
        ));
        let schema = AssetSchema::new();
        let operands = Arc::new(OperandResolver::default());
        let handler = ClauseHandler::new(
            Arc::clone(&information),
            Arc::new(EqualityQueryFactory::new(
                schema.status,
                Arc::clone(&operands),
                Arc::new(VerbatimValues),
            )),
            Arc::new(SupportedOperatorsValidator::new(
                information.supported_operators.clone(),
            )),
            Arc::new(AdminOnly),
            Arc::new(GlobalContextFactory),
        );

        let mut registry = SearchHandlerRegistry::new();
        registry.register(&create_handler(&DefaultSearcherFactory, handler).unwrap());

        let clause = terminal("secret", Operator::Equals, Operand::text("x"));

        let anonymous = RequestContext::new();
        let messages = registry.validate_clause(&anonymous, &clause);
        assert_eq!(messages.messages()[0].key, "field-not-visible");

        let admin = RequestContext::for_user("admin");
        assert!(registry.validate_clause(&admin, &clause).is_empty());
    }

    #[test]
    fn handler_construction_failure_is_fatal() {
        /// Searcher factory that always fails.
        struct Failing;

        impl SearcherFactory for Failing {
            fn create(
                &self,
                _info: &ClauseInformation,
            ) -> Result<Arc<dyn FieldSearcher>, SearchError> {
                Err(SearchError::Session("backend unavailable".to_string()))
            }
        }

        let information = Arc::new(ClauseInformation::new(
            ClauseNames::single("status"),
            Some("status".to_string()),
            Some("status".to_string()),
            operators_from_classes(&[class::EQUALITY]),
            DataType::Option,
        ));
        let schema = AssetSchema::new();
        let handler = ClauseHandler::new(
            Arc::clone(&information),
            Arc::new(EqualityQueryFactory::new(
                schema.status,
                Arc::new(OperandResolver::default()),
                Arc::new(VerbatimValues),
            )),
            Arc::new(SupportedOperatorsValidator::new(
                information.supported_operators.clone(),
            )),
            Arc::new(Anyone),
            Arc::new(GlobalContextFactory),
        );

        let result = create_handler(&Failing, handler);
        assert!(matches!(result, Err(SearchError::Handler { .. })));
    }

    #[test]
    fn field_searcher_identity() {
        let information = ClauseInformation::new(
            ClauseNames::single("status"),
            Some("status".to_string()),
            Some("status".to_string()),
            operators_from_classes(&[class::EQUALITY]),
            DataType::Option,
        );
        let searcher = AssetFieldSearcher::new(&information).unwrap();
        assert_eq!(searcher.field_id(), "status");
    }
}
