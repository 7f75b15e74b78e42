//! # Tempora
//!
//! Timeframe resolution and semantic filter composition for analytics
//! queries.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Query Context (entities, metrics, timeframes)     │
//! └─────────────────────────────────────────────────────────┘
//!            │                                │
//!            ▼ [temporal resolver]            ▼ [column mapper]
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │  ResolvedSpan            │   │  Canonical columns       │
//! │  (date range | season)   │   │  (via semantic layer)    │
//! └──────────────────────────┘   └──────────────────────────┘
//!            │                                │
//!            └──────────────┬─────────────────┘
//!                           ▼ [filter engine]
//! ┌─────────────────────────────────────────────────────────┐
//! │       Predicate (one shared representation)              │
//! └─────────────────────────────────────────────────────────┘
//!            │                                │
//!            ▼ [execute in memory]            ▼ [render as query text]
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │  Filtered row subset     │   │  WHERE clause             │
//! └──────────────────────────┘   └──────────────────────────┘
//! ```
//!
//! Everything is synchronous and deterministic: the reference instant is an
//! explicit parameter everywhere, and the only shared state is the
//! resolver's concurrency-safe memo cache.

pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod semantic;
pub mod temporal;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::dataset::{Dataset, DatasetSchema, Value};
    pub use crate::error::{ResolveError, ResolveResult, Strictness};
    pub use crate::filter::{Dialect, FilterEngine, FilterSet, Predicate, QueryContext, SqlDialect};
    pub use crate::semantic::{resolve_column, SemanticLayer};
    pub use crate::temporal::{
        resolve, Resolution, ResolvedSpan, ResolverOptions, TemporalResolver,
    };
}

// Also export at crate root for convenience
pub use dataset::{Dataset, DatasetSchema};
pub use error::{ResolveError, Strictness};
pub use filter::{Dialect, FilterEngine, FilterSet, Predicate, QueryContext};
pub use semantic::SemanticLayer;
pub use temporal::{ResolvedSpan, TemporalResolver};
