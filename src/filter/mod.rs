//! Filter composition, execution, and query-text rendering.

pub mod dialect;
mod engine;
mod predicate;
pub mod token;

pub use dialect::{Ansi, Dialect, SqlDialect};
pub use engine::{FilterEngine, FilterSet, QueryContext};
pub use predicate::Predicate;
pub use token::{Token, TokenStream};
