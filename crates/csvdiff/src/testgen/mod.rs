//! Backend-agnostic data test specifications.

mod generator;
mod spec;

pub use generator::TestSpecGenerator;
pub use spec::{GeneratedTests, TestFramework, TestSpec, TestSubtype, TestType};
