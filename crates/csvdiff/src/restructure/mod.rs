//! Schema restructuring: normalization opportunities and the column mapping
//! a DDL or diagram renderer needs.

mod advisor;
mod recommendation;

pub use advisor::{SchemaAdvisor, default_table_name};
pub use recommendation::{ColumnDefinition, Recommendation, RestructureFormat, RestructureResult};
