//! Free-text entity key to canonical dataset column resolution.
//!
//! Pure lookups over the declarative alias table; all comparisons are
//! trimmed and lowercased. Side-effect-free and memoizable, though in
//! practice alias tables are small enough that nobody bothers.

use super::layer::{ColumnType, SemanticLayer};
use crate::error::{ResolveError, ResolveResult};

/// Resolve a free-text key to a canonical column.
///
/// Lookup order:
/// 1. exact (normalized) alias match against every declared column;
///    the declared column name is preferred as it appears in
///    `available_columns` (returning the dataset's own casing), falling
///    back to the layer's identifier when the dataset lacks it;
/// 2. direct case-insensitive match of the key against `available_columns`;
/// 3. [`ResolveError::UnmappableEntity`].
pub fn resolve_column(
    key: &str,
    layer: &SemanticLayer,
    available_columns: &[String],
) -> ResolveResult<String> {
    let needle = normalize(key);

    for (declared, def) in layer.columns() {
        let alias_hit = def.semantic.iter().any(|alias| normalize(alias) == needle);
        if alias_hit {
            return Ok(match find_ci(available_columns, declared) {
                Some(actual) => actual.to_string(),
                None => declared.to_string(),
            });
        }
    }

    if let Some(actual) = find_ci(available_columns, &needle) {
        return Ok(actual.to_string());
    }

    Err(ResolveError::UnmappableEntity {
        key: key.trim().to_string(),
    })
}

/// Declared type of a column, looked up case-insensitively across tables.
pub fn column_type(layer: &SemanticLayer, column: &str) -> Option<ColumnType> {
    let needle = normalize(column);
    layer
        .columns()
        .find(|(name, _)| normalize(name) == needle)
        .map(|(_, def)| def.column_type)
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn find_ci<'a>(columns: &'a [String], name: &str) -> Option<&'a str> {
    let needle = normalize(name);
    columns
        .iter()
        .find(|column| normalize(column) == needle)
        .map(String::as_str)
}
