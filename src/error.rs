//! Error types for timeframe resolution and filter composition.
//!
//! Every failure carries the offending input so it can be logged as a
//! diagnostic or surfaced to the caller for a clarified query. Errors are
//! `Clone` because resolver outcomes (including failures) are memoized.

use serde::{Deserialize, Serialize};

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Which dataset attribute a temporal predicate needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalAttribute {
    Date,
    Season,
}

impl std::fmt::Display for TemporalAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemporalAttribute::Date => write!(f, "date"),
            TemporalAttribute::Season => write!(f, "season"),
        }
    }
}

/// Unified error type for the resolution pipeline.
///
/// Nothing here is fatal to the process: every variant is per-request and
/// recoverable by the caller re-issuing a clarified query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No recognition rule matched the timeframe expression.
    #[error("unrecognized timeframe expression: '{expression}'")]
    UnrecognizedExpression { expression: String },

    /// The expression mentions a season but no 4-digit year could be
    /// extracted from it.
    #[error("season expression '{expression}' has no extractable year")]
    AmbiguousSeasonExpression { expression: String },

    /// An entity key matched neither a semantic-layer alias nor a dataset
    /// column.
    #[error("entity '{key}' does not map to any dataset column")]
    UnmappableEntity { key: String },

    /// A resolved temporal predicate needs a date or season column the
    /// dataset does not declare or carry.
    #[error("dataset has no {attribute} attribute for timeframe '{expression}'")]
    MissingDatasetAttribute {
        attribute: TemporalAttribute,
        expression: String,
    },
}

/// Failure-handling policy for unresolved entities and timeframes.
///
/// One explicit configuration instead of per-call-site divergence: `Lenient`
/// drops the offending predicate and records a diagnostic, `Strict`
/// propagates the first failure to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Skip-and-warn: the default for read-facing query tools.
    #[default]
    Lenient,
    /// Fail-fast: abort the whole request on the first failure.
    Strict,
}
