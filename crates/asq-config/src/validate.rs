//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential
//! issues. Warnings never prevent the configuration from being used.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `default_limit` is zero, so every search returns nothing.
    ZeroLimit,
    /// A soft-field entry is empty or whitespace.
    BlankSoftField,
    /// The same field appears more than once in `soft_fields`.
    DuplicateSoftField {
        /// The duplicated field name.
        field: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroLimit => write!(f, "search.default_limit is 0; searches return no results"),
            Self::BlankSoftField => write!(f, "validation.soft_fields contains a blank entry"),
            Self::DuplicateSoftField { field } => {
                write!(f, "validation.soft_fields lists '{field}' more than once")
            }
        }
    }
}

/// Validates a configuration, returning warnings for suspicious values.
pub(crate) fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.search.default_limit == 0 {
        warnings.push(ConfigWarning::ZeroLimit);
    }

    let mut seen = Vec::new();
    for field in &config.validation.soft_fields {
        if field.trim().is_empty() {
            warnings.push(ConfigWarning::BlankSoftField);
            continue;
        }
        let lowered = field.to_lowercase();
        if seen.contains(&lowered) {
            warnings.push(ConfigWarning::DuplicateSoftField {
                field: field.clone(),
            });
        } else {
            seen.push(lowered);
        }
    }

    warnings
}
