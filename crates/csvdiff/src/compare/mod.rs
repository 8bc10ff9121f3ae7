//! Pairwise dataset comparison.

mod comparator;
mod result;

pub use comparator::Comparator;
pub use result::{
    ComparisonResult, RowCountChange, StatisticChange, StructuralChanges, TypeChange, ValueChange,
};
