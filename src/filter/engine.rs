//! Filter composition and execution.
//!
//! Builds one predicate structure from a query context and the semantic
//! layer, then executes it in memory or renders it as query text - both
//! from the same [`Predicate`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::dialect::Dialect;
use super::predicate::Predicate;
use crate::dataset::{Dataset, DatasetSchema, Value};
use crate::error::{ResolveError, ResolveResult, Strictness, TemporalAttribute};
use crate::semantic::{self, ColumnType, SemanticLayer};
use crate::temporal::{ResolvedSpan, TemporalResolver};

/// Extracted query intent, as supplied by the upstream collaborator.
///
/// Entity insertion order is irrelevant; a BTreeMap keeps predicate order
/// (and therefore rendered query text) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryContext {
    pub entities: BTreeMap<String, String>,
    pub metrics: Vec<String>,
    pub timeframes: Vec<String>,
}

/// A composed filter plus the diagnostics gathered while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet {
    pub predicate: Predicate,
    /// Predicates dropped in lenient mode, one entry per drop.
    pub diagnostics: Vec<ResolveError>,
}

impl FilterSet {
    /// Execute the predicate, returning the matching row subset.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let rows = dataset
            .rows()
            .iter()
            .filter(|row| self.predicate.matches(dataset, row))
            .cloned()
            .collect();
        dataset.with_rows(rows)
    }

    /// Render the equivalent WHERE clause. Empty for the identity filter.
    pub fn where_clause(&self, dialect: Dialect) -> String {
        if self.predicate.is_identity() {
            String::new()
        } else {
            format!("WHERE {}", self.predicate.to_sql(dialect))
        }
    }
}

/// Builds filter sets from query contexts.
#[derive(Debug, Default)]
pub struct FilterEngine {
    resolver: TemporalResolver,
    strictness: Strictness,
}

impl FilterEngine {
    pub fn new(resolver: TemporalResolver, strictness: Strictness) -> Self {
        Self { resolver, strictness }
    }

    pub fn resolver(&self) -> &TemporalResolver {
        &self.resolver
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Compose one predicate from the context.
    ///
    /// Entity predicates form a conjunction; every resolved timeframe joins
    /// a disjunction ("falls in any requested period") that is ANDed with
    /// the entity group. Empty entity and timeframe sets both yield the
    /// identity filter.
    ///
    /// In lenient mode unresolvable parts are dropped and recorded as
    /// diagnostics; in strict mode the first failure is returned.
    pub fn build(
        &self,
        context: &QueryContext,
        layer: &SemanticLayer,
        dataset: &Dataset,
        schema: &DatasetSchema,
        reference: NaiveDate,
    ) -> ResolveResult<FilterSet> {
        let mut diagnostics = Vec::new();

        let mut entity_parts = Vec::new();
        for (key, value) in &context.entities {
            match semantic::resolve_column(key, layer, dataset.columns()) {
                Ok(column) => entity_parts.push(entity_predicate(layer, dataset, &column, value)),
                Err(err) => self.drop_or_fail(err, &mut diagnostics)?,
            }
        }

        let mut temporal_parts = Vec::new();
        for expression in &context.timeframes {
            match self.resolver.resolve(expression, reference) {
                Ok(ResolvedSpan::DateRange { start, end }) => {
                    match attribute_column(
                        dataset,
                        schema.date_column.as_deref(),
                        TemporalAttribute::Date,
                        expression,
                    ) {
                        Ok(column) => {
                            temporal_parts.push(Predicate::DateBetween { column, start, end })
                        }
                        Err(err) => self.drop_or_fail(err, &mut diagnostics)?,
                    }
                }
                Ok(ResolvedSpan::Season { value }) => {
                    match attribute_column(
                        dataset,
                        schema.season_column.as_deref(),
                        TemporalAttribute::Season,
                        expression,
                    ) {
                        Ok(column) => temporal_parts.push(Predicate::SeasonEq { column, value }),
                        Err(err) => self.drop_or_fail(err, &mut diagnostics)?,
                    }
                }
                Err(err) => self.drop_or_fail(err, &mut diagnostics)?,
            }
        }

        let predicate = Predicate::and(vec![
            Predicate::and(entity_parts),
            Predicate::or(temporal_parts),
        ]);
        debug!("composed filter: {:?}", predicate);

        Ok(FilterSet {
            predicate,
            diagnostics,
        })
    }

    fn drop_or_fail(
        &self,
        err: ResolveError,
        diagnostics: &mut Vec<ResolveError>,
    ) -> ResolveResult<()> {
        match self.strictness {
            Strictness::Strict => Err(err),
            Strictness::Lenient => {
                warn!("dropping predicate: {}", err);
                diagnostics.push(err);
                Ok(())
            }
        }
    }
}

/// One equality predicate per entity. String-typed columns compare
/// case-insensitively; numeric columns compare by parsed value. A value
/// that fails to parse against a numeric column falls back to text
/// comparison rather than a predicate that can panic downstream.
fn entity_predicate(
    layer: &SemanticLayer,
    dataset: &Dataset,
    column: &str,
    value: &str,
) -> Predicate {
    let declared = semantic::column_type(layer, column).unwrap_or_else(|| infer_type(dataset, column));
    if declared == ColumnType::Number {
        if let Ok(parsed) = value.trim().parse::<f64>() {
            if parsed.is_finite() {
                return Predicate::NumberEq {
                    column: column.to_string(),
                    value: parsed,
                };
            }
        }
    }
    Predicate::TextEq {
        column: column.to_string(),
        value: value.trim().to_string(),
    }
}

/// Infer a column type from its first non-null cell when the semantic layer
/// does not declare one.
fn infer_type(dataset: &Dataset, column: &str) -> ColumnType {
    let Some(index) = dataset.column_index(column) else {
        return ColumnType::String;
    };
    for row in dataset.rows() {
        match row.get(index) {
            Some(Value::Num(_)) => return ColumnType::Number,
            Some(Value::Date(_)) => return ColumnType::Date,
            Some(Value::Str(_)) => return ColumnType::String,
            _ => continue,
        }
    }
    ColumnType::String
}

/// The dataset column backing a temporal attribute, in the dataset's own
/// casing. Fails when the attribute is undeclared or the column is absent,
/// so the predicate is dropped instead of silently miscomputed.
fn attribute_column(
    dataset: &Dataset,
    declared: Option<&str>,
    attribute: TemporalAttribute,
    expression: &str,
) -> ResolveResult<String> {
    declared
        .and_then(|name| {
            dataset
                .column_index(name)
                .map(|index| dataset.columns()[index].clone())
        })
        .ok_or_else(|| ResolveError::MissingDatasetAttribute {
            attribute,
            expression: expression.to_string(),
        })
}
