//! Data model shared by every analyzer: column profiles and dataset metadata.

mod column;
mod metadata;
mod types;

pub use column::{ColumnProfile, LengthStatistics};
pub use metadata::{DatasetMetadata, FileInfo};
pub use types::{Bound, ColumnType, TypeFamily};
