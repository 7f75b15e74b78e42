//! Memoizing wrapper around the pure resolver.
//!
//! The cache is keyed by (normalized expression, reference date) so two
//! spellings of the same phrase share an entry. Failures are cached too:
//! the resolver is deterministic, so an expression that failed once will
//! fail the same way again.

use chrono::NaiveDate;
use dashmap::DashMap;

use super::resolver::{self, ResolverOptions};
use super::ResolvedSpan;
use crate::error::ResolveResult;

/// A timeframe resolver with a concurrency-safe memo cache.
///
/// Safe to share across request tasks (`Send + Sync`); concurrent lookups
/// of the same key may both compute, but they compute the same value.
#[derive(Debug, Default)]
pub struct TemporalResolver {
    options: ResolverOptions,
    cache: DashMap<(String, NaiveDate), ResolveResult<ResolvedSpan>>,
}

impl TemporalResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            options,
            cache: DashMap::new(),
        }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve an expression, consulting the memo cache first.
    pub fn resolve(&self, expression: &str, reference: NaiveDate) -> ResolveResult<ResolvedSpan> {
        let normalized = resolver::normalize(expression);
        if let Some(hit) = self.cache.get(&(normalized.clone(), reference)) {
            return hit.clone();
        }
        let outcome = resolver::resolve_normalized(&normalized, reference, &self.options);
        self.cache.insert((normalized, reference), outcome.clone());
        outcome
    }

    /// Number of memoized (expression, reference) pairs.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
