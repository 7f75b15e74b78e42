//! Semantic layer: declarative alias table and column resolution.

mod layer;
mod mapper;

pub use layer::{Aliases, ColumnDef, ColumnType, LayerError, MetricDef, SemanticLayer, TableDef};
pub use mapper::{column_type, resolve_column};
