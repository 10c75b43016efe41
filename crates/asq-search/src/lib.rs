//! Tantivy-based search core for asq.
//!
//! This crate is the semantic half of asq: it takes the clause trees
//! produced by `asq-query` and turns them into validated, executable
//! searches against the asset index. It handles:
//! - Clause metadata and the per-clause-name handler registry
//! - Operand resolution with a function registry and request-scoped caching
//! - Clause validation (operator whitelists, value existence, permissions)
//! - Index info resolution (names and ids to indexed values)
//! - Clause query factories building Tantivy queries
//! - Request-scoped searcher sessions with at-most-one-open semantics
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use asq_query::parse_query;
//! use asq_search::{
//!     AssetSchema, ClauseNames, DataType, EntityField, OperandResolver, RequestContext,
//!     StaticCatalog, standard_registry,
//! };
//!
//! let schema = AssetSchema::new();
//! let operands = Arc::new(OperandResolver::default());
//! let registry = standard_registry(
//!     &schema,
//!     &operands,
//!     vec![EntityField {
//!         names: ClauseNames::single("status"),
//!         index_field: "status".to_string(),
//!         data_type: DataType::Option,
//!         catalog: Arc::new(StaticCatalog::new(vec![(1, "Open".to_string())])),
//!     }],
//!     &asq_config::Config::default(),
//! )
//! .unwrap();
//!
//! let ctx = RequestContext::new();
//! let query = parse_query("status = Open").unwrap();
//! let clause = query.where_clause.unwrap();
//! assert!(registry.validate(&ctx, &clause).is_empty());
//! let backend_query = registry.build(&ctx, &clause).unwrap();
//! ctx.close();
//! # drop(backend_query);
//! ```

#![warn(missing_docs)]

mod context;
mod error;
mod execute;
mod factory;
mod handler;
mod info;
mod literal;
mod message;
mod operand;
mod resolver;
mod schema;
mod session;
mod suggest;
mod validate;

pub use context::{OperandCacheKey, RequestContext};
pub use error::SearchError;
pub use execute::{AssetHit, execute_query, match_all};
pub use factory::{
    ClauseQueryFactory, EqualityQueryFactory, QueryBuildError, RelationalQueryFactory,
    TextQueryFactory,
};
pub use handler::{
    Anyone, AssetFieldSearcher, ClauseContext, ClauseContextFactory, ClauseHandler,
    DefaultSearcherFactory, EntityField, FieldSearcher, GlobalContextFactory, PermissionChecker,
    SearchHandler, SearchHandlerRegistry, SearcherFactory, create_handler, standard_registry,
};
pub use info::{ClauseInformation, ClauseNames, DataType, operators_from_classes};
pub use literal::QueryLiteral;
pub use message::{Message, MessageSet, Severity};
pub use operand::{FunctionHandler, FunctionRegistry, OperandResolver};
pub use resolver::{
    CatalogResolver, IndexInfoResolver, Indexed, IndexedValueSource, NameLookup, StaticCatalog,
    StaticEntity, VerbatimValues,
};
pub use schema::{AssetSchema, ChangeSchema, EMPTY_SENTINEL};
pub use session::{SearcherCache, SearcherSession, SessionSlot};
pub use suggest::{StaticValuesGenerator, ValuesGenerator};
pub use validate::{
    ClauseValidator, SequentialClauseValidator, SupportedOperatorsValidator, ValuesExistValidator,
    user_clause_validator,
};
