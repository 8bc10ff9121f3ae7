//! Cleaning recommendations derived from validation issues.

mod advisor;
mod step;

pub use advisor::CleaningAdvisor;
pub use step::{CleaningAction, CleaningPlan, CleaningStep, PotentialImpact};
