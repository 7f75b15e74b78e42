//! Timeframe expression resolution.
//!
//! Turns a free-text phrase plus an explicit reference date into either a
//! concrete inclusive calendar range or a symbolic season label. The
//! resolver is pure and deterministic; [`TemporalResolver`] adds an optional
//! concurrent memo cache on top of the pure function.

mod cache;
mod patterns;
mod resolver;

pub use cache::TemporalResolver;
pub use resolver::{resolve, ResolverOptions};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, ResolveResult};

/// Result of resolving a timeframe expression.
///
/// Exactly one variant: a span is either a concrete inclusive date range or
/// an opaque season label compared by equality, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedSpan {
    /// Inclusive calendar range with `start <= end`.
    DateRange { start: NaiveDate, end: NaiveDate },
    /// Symbolic season label. Not a date; compared by equality only.
    Season { value: String },
}

impl ResolvedSpan {
    /// Build a date range, keeping the `start <= end` invariant even if the
    /// underlying arithmetic produced a reversed pair.
    pub fn date_range(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            ResolvedSpan::DateRange { start: end, end: start }
        } else {
            ResolvedSpan::DateRange { start, end }
        }
    }

    pub fn season(value: impl Into<String>) -> Self {
        ResolvedSpan::Season { value: value.into() }
    }

    pub fn is_season(&self) -> bool {
        matches!(self, ResolvedSpan::Season { .. })
    }
}

/// Wire-level resolution outcome, folding failures into the payload.
///
/// Serializes as `{"kind":"date_range",...}`, `{"kind":"season",...}` or
/// `{"kind":"failure","reason":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    DateRange { start: NaiveDate, end: NaiveDate },
    Season { value: String },
    Failure { reason: String },
}

impl From<ResolveResult<ResolvedSpan>> for Resolution {
    fn from(outcome: ResolveResult<ResolvedSpan>) -> Self {
        match outcome {
            Ok(ResolvedSpan::DateRange { start, end }) => Resolution::DateRange { start, end },
            Ok(ResolvedSpan::Season { value }) => Resolution::Season { value },
            Err(err) => Resolution::Failure {
                reason: err.to_string(),
            },
        }
    }
}

impl From<ResolveError> for Resolution {
    fn from(err: ResolveError) -> Self {
        Resolution::Failure {
            reason: err.to_string(),
        }
    }
}
