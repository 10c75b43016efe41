//! Value suggestions.
//!
//! Some clauses can offer completions for partially typed values; others
//! (free text, serial numbers) have nothing sensible to suggest. A clause
//! handler therefore carries an optional [`ValuesGenerator`].

/// Generates value suggestions for one clause.
pub trait ValuesGenerator {
    /// Values matching `prefix`, at most `limit`, for the given user.
    fn suggest(&self, user: Option<&str>, prefix: &str, limit: usize) -> Vec<String>;
}

/// Suggestion source over a fixed list of known names.
pub struct StaticValuesGenerator {
    /// The suggestible names, as displayed.
    names: Vec<String>,
}

impl StaticValuesGenerator {
    /// Creates a generator over known names. The names are sorted once so
    /// suggestions come back in stable order.
    pub fn new(mut names: Vec<String>) -> Self {
        names.sort();
        Self { names }
    }
}

impl ValuesGenerator for StaticValuesGenerator {
    fn suggest(&self, _user: Option<&str>, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&prefix))
            .take(limit)
            .cloned()
            .collect()
    }
}
