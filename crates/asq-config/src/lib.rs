//! Configuration system for asq.
//!
//! asq uses TOML configuration files named `.asq.toml`. Configuration is
//! resolved by walking up the directory tree from the current working
//! directory and taking the first `.asq.toml` found, falling back to
//! `~/.asq.toml`, then to built-in defaults.

#![warn(missing_docs)]

mod error;
mod parse;
mod validate;

use std::path::{Path, PathBuf};

use directories::BaseDirs;

pub use error::ConfigError;
pub use parse::{
    RawConfig, RawIndexSettings, RawSearchSettings, RawValidationSettings, parse_config_file,
    parse_config_str,
};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Name of the per-directory configuration file.
pub const CONFIG_FILENAME: &str = ".asq.toml";

/// Index location settings.
#[derive(Debug, Clone, Default)]
pub struct IndexSettings {
    /// Directory holding the search index. `None` means "use the default
    /// platform data directory".
    pub dir: Option<PathBuf>,
}

/// Search settings.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Maximum results per query.
    pub default_limit: usize,
    /// Field applied when a query carries no explicit ordering, if any.
    pub default_order_by: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: 50,
            default_order_by: None,
        }
    }
}

/// Validation settings.
#[derive(Debug, Clone)]
pub struct ValidationSettings {
    /// Fields whose value-existence failures are warnings instead of errors.
    pub soft_fields: Vec<String>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            soft_fields: vec!["assignee".to_string()],
        }
    }
}

impl ValidationSettings {
    /// Returns true when existence failures for `field` should be warnings.
    pub fn is_soft_field(&self, field: &str) -> bool {
        self.soft_fields
            .iter()
            .any(|soft| soft.eq_ignore_ascii_case(field))
    }
}

/// Top-level resolved configuration for asq.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Index location settings.
    pub index: IndexSettings,
    /// Search settings.
    pub search: SearchSettings,
    /// Validation settings.
    pub validation: ValidationSettings,
}

impl Config {
    /// Loads configuration by discovering the nearest `.asq.toml`.
    ///
    /// Walks from `cwd` up to the filesystem root; the first file found
    /// wins. Falls back to `~/.asq.toml`, then to defaults when no file
    /// exists anywhere.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        match discover_config_file(cwd) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from one specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        Ok(Self::from_raw(raw))
    }

    /// Builds a resolved configuration from a raw parse, applying defaults.
    pub fn from_raw(raw: RawConfig) -> Self {
        let mut config = Self::default();

        if let Some(index) = raw.index
            && let Some(dir) = index.dir
        {
            config.index.dir = Some(PathBuf::from(dir));
        }

        if let Some(search) = raw.search {
            if let Some(limit) = search.default_limit {
                config.search.default_limit = limit;
            }
            if let Some(order_by) = search.default_order_by {
                config.search.default_order_by = Some(order_by);
            }
        }

        if let Some(validation) = raw.validation
            && let Some(soft_fields) = validation.soft_fields
        {
            config.validation.soft_fields = soft_fields;
        }

        config
    }

    /// Returns warnings for suspicious but usable configuration values.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Resolves the index directory: the configured one, or the platform
    /// data directory default.
    pub fn index_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.index.dir {
            return Ok(dir.clone());
        }
        let base = BaseDirs::new().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(base.data_dir().join("asq").join("index"))
    }
}

/// Walks from `cwd` upward looking for a `.asq.toml`, then tries the home
/// directory. Returns the first file that exists.
pub fn discover_config_file(cwd: &Path) -> Option<PathBuf> {
    let mut current = Some(cwd);
    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }

    let base = BaseDirs::new()?;
    let global = base.home_dir().join(CONFIG_FILENAME);
    global.is_file().then_some(global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_applied() {
        let config = Config::default();
        assert_eq!(config.search.default_limit, 50);
        assert_eq!(config.search.default_order_by, None);
        assert!(config.validation.is_soft_field("assignee"));
        assert!(config.validation.is_soft_field("ASSIGNEE"));
        assert!(!config.validation.is_soft_field("status"));
    }

    #[test]
    fn from_raw_overrides_defaults() {
        let raw = parse_config_str(
            "[search]\ndefault_limit = 10\ndefault_order_by = \"name\"\n",
            Path::new("test.toml"),
        )
        .unwrap();
        let config = Config::from_raw(raw);
        assert_eq!(config.search.default_limit, 10);
        assert_eq!(config.search.default_order_by.as_deref(), Some("name"));
        // Untouched sections keep their defaults.
        assert!(config.validation.is_soft_field("assignee"));
    }

    #[test]
    fn configured_index_dir_wins() {
        let raw = parse_config_str("[index]\ndir = \"/tmp/idx\"\n", Path::new("test.toml")).unwrap();
        let config = Config::from_raw(raw);
        assert_eq!(config.index_dir().unwrap(), PathBuf::from("/tmp/idx"));
    }

    #[test]
    fn discovery_walks_upward() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "[search]\ndefault_limit = 7\n").unwrap();

        let found = discover_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILENAME));

        let config = Config::load(&nested).unwrap();
        assert_eq!(config.search.default_limit, 7);
    }

    #[test]
    fn load_without_any_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        // No .asq.toml anywhere under the temp dir; the walk may still find
        // one above it, so parse the empty raw directly for determinism.
        let config = Config::from_raw(RawConfig::default());
        assert_eq!(config.search.default_limit, 50);
        drop(dir);
    }
}
