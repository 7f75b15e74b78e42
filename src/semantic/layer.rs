//! The semantic layer document.
//!
//! A human-editable TOML file mapping dataset columns to descriptions,
//! types, and alias lists, plus an informational metrics section:
//!
//! ```toml
//! [tables.vehicle_trips.columns.vehicle_id]
//! description = "Vehicle identifier"
//! type = "string"
//! semantic = ["vid", "vehicle", "vehicle id"]
//!
//! [tables.vehicle_trips.columns.drive_date]
//! type = "date"
//! semantic = "trip date"
//!
//! [metrics.utilization]
//! formula = "driven_km / available_km"
//! business_rules = "Exclude maintenance days"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for loading semantic layer documents.
#[derive(Debug, thiserror::Error)]
pub enum LayerError {
    #[error("semantic layer file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read semantic layer: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse semantic layer: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Root of the semantic layer document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SemanticLayer {
    /// Declared tables, by name. BTreeMap keeps alias resolution order
    /// deterministic when two tables declare the same alias.
    pub tables: BTreeMap<String, TableDef>,

    /// Named metrics. Informational only: formulas and rules are text for
    /// upstream collaborators, never executed by this crate.
    pub metrics: BTreeMap<String, MetricDef>,
}

/// A declared table and its columns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableDef {
    pub description: String,
    pub columns: BTreeMap<String, ColumnDef>,
}

/// A declared column.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnDef {
    pub description: String,

    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Alias strings this column answers to. Accepts a single string or a
    /// list in the document.
    pub semantic: Aliases,
}

/// Declared column type, used to pick the comparison mode for entity
/// predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    #[default]
    String,
    Number,
    Date,
}

/// Zero, one, or many alias strings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Aliases {
    One(String),
    Many(Vec<String>),
}

impl Default for Aliases {
    fn default() -> Self {
        Aliases::Many(Vec::new())
    }
}

impl Aliases {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            Aliases::One(alias) => std::slice::from_ref(alias).iter().map(String::as_str),
            Aliases::Many(aliases) => aliases.as_slice().iter().map(String::as_str),
        }
    }
}

/// A named metric. Text only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricDef {
    pub formula: String,
    pub constraints: Option<String>,
    pub business_rules: Option<String>,
}

impl SemanticLayer {
    /// Load a semantic layer from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LayerError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse a semantic layer from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, LayerError> {
        Ok(toml::from_str(content)?)
    }

    /// Iterate all declared columns across all tables, in table order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnDef)> {
        self.tables.values().flat_map(|table| {
            table
                .columns
                .iter()
                .map(|(name, def)| (name.as_str(), def))
        })
    }
}
