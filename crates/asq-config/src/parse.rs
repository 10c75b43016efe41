//! Configuration file parsing.
//!
//! Parses `.asq.toml` files into intermediate `RawConfig` structures that
//! preserve the optional nature of all fields before defaults are applied.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional; defaults are applied when building [`crate::Config`].
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// Index location section.
    pub index: Option<RawIndexSettings>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Validation settings section.
    pub validation: Option<RawValidationSettings>,
}

/// Raw index settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// Directory holding the search index.
    pub dir: Option<String>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Maximum results per query.
    pub default_limit: Option<usize>,
    /// Field applied when a query carries no explicit ordering.
    pub default_order_by: Option<String>,
}

/// Raw validation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawValidationSettings {
    /// Fields whose value-existence failures are warnings instead of errors.
    pub soft_fields: Option<Vec<String>>,
}

/// Parses a configuration string.
pub fn parse_config_str(content: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a configuration file.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&content, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> RawConfig {
        parse_config_str(content, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_config_parses() {
        let raw = parse("");
        assert!(raw.index.is_none());
        assert!(raw.search.is_none());
        assert!(raw.validation.is_none());
    }

    #[test]
    fn full_config_parses() {
        let raw = parse(
            r#"
            [index]
            dir = "/var/lib/asq/index"

            [search]
            default_limit = 25
            default_order_by = "name"

            [validation]
            soft_fields = ["assignee", "owner"]
            "#,
        );
        assert_eq!(raw.index.unwrap().dir.unwrap(), "/var/lib/asq/index");
        let search = raw.search.unwrap();
        assert_eq!(search.default_limit, Some(25));
        assert_eq!(search.default_order_by.as_deref(), Some("name"));
        assert_eq!(
            raw.validation.unwrap().soft_fields.unwrap(),
            vec!["assignee", "owner"]
        );
    }

    #[test]
    fn partial_sections_are_fine() {
        let raw = parse("[search]\ndefault_limit = 5\n");
        let search = raw.search.unwrap();
        assert_eq!(search.default_limit, Some(5));
        assert_eq!(search.default_order_by, None);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let result = parse_config_str("not valid [", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }
}
