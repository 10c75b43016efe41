//! Shared command context: configuration, schema, and the clause registry.

use std::{collections::HashMap, env, fs, path::PathBuf, sync::Arc};

use asq_config::Config;
use asq_search::{
    AssetSchema, ClauseNames, DataType, EntityField, OperandResolver, SearchHandlerRegistry,
    StaticCatalog, standard_registry,
};

/// Catalog data file expected next to the index, written by the (external)
/// import side: clause name to (id, name) rows.
const CATALOGS_FILENAME: &str = "catalogs.json";

/// Everything a command needs: resolved configuration, the asset schema,
/// and the clause-handler registry built over the deployment's catalogs.
pub struct CommandContext {
    /// Resolved configuration.
    pub config: Config,
    /// The asset document schema.
    pub schema: AssetSchema,
    /// The clause-handler registry.
    pub registry: SearchHandlerRegistry,
}

impl CommandContext {
    /// Builds the context for the current working directory.
    pub fn new() -> Result<Self, String> {
        let cwd = env::current_dir().map_err(|e| format!("could not determine current directory: {e}"))?;
        let config = Config::load(&cwd).map_err(|e| e.to_string())?;

        for warning in config.validate() {
            eprintln!("warning: {warning}");
        }

        let schema = AssetSchema::new();
        let operands = Arc::new(OperandResolver::default());
        let catalogs = load_catalogs(&config);

        let entity_fields = vec![
            entity_field(
                ClauseNames::with_aliases("status", vec!["state".to_string()]),
                "status",
                DataType::Option,
                &catalogs,
            ),
            entity_field(
                ClauseNames::single("manufacturer"),
                "manufacturer",
                DataType::Option,
                &catalogs,
            ),
            entity_field(
                ClauseNames::single("catalog"),
                "catalog",
                DataType::Option,
                &catalogs,
            ),
            entity_field(
                ClauseNames::with_aliases("assignee", vec!["assignedTo".to_string()]),
                "assignee",
                DataType::User,
                &catalogs,
            ),
        ];

        let registry = standard_registry(&schema, &operands, entity_fields, &config)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            config,
            schema,
            registry,
        })
    }

    /// The index directory from configuration.
    pub fn index_dir(&self) -> Result<PathBuf, String> {
        self.config.index_dir().map_err(|e| e.to_string())
    }
}

/// Builds one entity field registration, with an empty catalog when the
/// deployment provides none.
fn entity_field(
    names: ClauseNames,
    index_field: &str,
    data_type: DataType,
    catalogs: &HashMap<String, Vec<(i64, String)>>,
) -> EntityField {
    let rows = catalogs.get(index_field).cloned().unwrap_or_default();
    EntityField {
        names,
        index_field: index_field.to_string(),
        data_type,
        catalog: Arc::new(StaticCatalog::new(rows)),
    }
}

/// Loads catalog rows from `catalogs.json` in the index directory, if
/// present. A missing or unreadable file just means empty catalogs.
fn load_catalogs(config: &Config) -> HashMap<String, Vec<(i64, String)>> {
    let Ok(dir) = config.index_dir() else {
        return HashMap::new();
    };
    let path = dir.join(CATALOGS_FILENAME);
    let Ok(content) = fs::read_to_string(&path) else {
        return HashMap::new();
    };
    match serde_json::from_str(&content) {
        Ok(catalogs) => catalogs,
        Err(e) => {
            eprintln!("warning: ignoring malformed {}: {e}", path.display());
            HashMap::new()
        }
    }
}
