// Public modules
pub mod algorithms;
pub mod error;
pub mod models;
pub mod reporting;
pub mod utils;

// Re-exports for convenience
pub use algorithms::greedy::{GreedyPlanner, PlanOptions};
pub use algorithms::RouteSolver;
pub use error::{LoadError, PlanError};
pub use models::{Card, DemandSet, Library, PlanOutcome, PlanStatus, Route};
