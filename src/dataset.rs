//! In-memory tabular snapshot the filter engine executes against.
//!
//! A `Dataset` is treated as immutable for the duration of one resolution;
//! filtering returns a new subset rather than mutating in place.

use chrono::NaiveDate;
use serde_json::{json, Map as JsonMap, Value as JsonValue};

/// Error type for dataset construction.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("row has {got} cells, expected {expected}")]
    ColumnCountMismatch { expected: usize, got: usize },

    #[error("expected a JSON array of objects")]
    NotRecords,

    #[error("failed to parse dataset JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Date(NaiveDate),
    Null,
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view: `Num` directly, or a string cell that parses.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Date view: `Date` directly, or an ISO `YYYY-MM-DD` string cell.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Str(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    fn to_json(&self) -> JsonValue {
        match self {
            Value::Str(s) => json!(s),
            Value::Num(n) => json!(n),
            Value::Date(d) => json!(d.to_string()),
            Value::Null => JsonValue::Null,
        }
    }
}

/// A table of named-column records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), DatasetError> {
        if row.len() != self.columns.len() {
            return Err(DatasetError::ColumnCountMismatch {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column position by name, exact match first, then case-insensitive.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .or_else(|| self.columns.iter().position(|c| c.eq_ignore_ascii_case(name)))
    }

    /// Rebuild a dataset with the same columns and a row subset.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<Value>>) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Load from a JSON array of objects. Column order follows first
    /// appearance; keys missing from a record become `Null`.
    pub fn from_json_records(content: &str) -> Result<Self, DatasetError> {
        let parsed: JsonValue = serde_json::from_str(content)?;
        let records = parsed.as_array().ok_or(DatasetError::NotRecords)?;

        let mut columns: Vec<String> = Vec::new();
        for record in records {
            let object = record.as_object().ok_or(DatasetError::NotRecords)?;
            for key in object.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut dataset = Dataset::new(columns);
        for record in records {
            let object = record.as_object().ok_or(DatasetError::NotRecords)?;
            let row = dataset
                .columns
                .iter()
                .map(|column| cell_from_json(object, column))
                .collect();
            dataset.rows.push(row);
        }
        Ok(dataset)
    }

    /// Render back to a JSON array of objects.
    pub fn to_json_records(&self) -> JsonValue {
        let records: Vec<JsonValue> = self
            .rows
            .iter()
            .map(|row| {
                let mut object = JsonMap::new();
                for (column, cell) in self.columns.iter().zip(row) {
                    object.insert(column.clone(), cell.to_json());
                }
                JsonValue::Object(object)
            })
            .collect();
        JsonValue::Array(records)
    }
}

fn cell_from_json(object: &JsonMap<String, JsonValue>, column: &str) -> Value {
    match object.get(column) {
        Some(JsonValue::String(s)) => Value::Str(s.clone()),
        Some(JsonValue::Number(n)) => match n.as_f64() {
            Some(f) => Value::Num(f),
            None => Value::Null,
        },
        Some(JsonValue::Bool(b)) => Value::Str(b.to_string()),
        Some(JsonValue::Null) | None => Value::Null,
        // Nested structures are not tabular cells.
        Some(_) => Value::Null,
    }
}

/// Declares which dataset columns carry the temporal attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSchema {
    /// Column holding the calendar date each record belongs to.
    pub date_column: Option<String>,
    /// Column holding the symbolic season label, if the dataset has one.
    pub season_column: Option<String>,
}

impl DatasetSchema {
    pub fn with_date(column: impl Into<String>) -> Self {
        Self {
            date_column: Some(column.into()),
            season_column: None,
        }
    }

    pub fn with_date_and_season(date: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            date_column: Some(date.into()),
            season_column: Some(season.into()),
        }
    }
}
