pub mod greedy;
pub mod nearest;

// Common algorithm traits
use crate::error::PlanError;
use crate::models::PlanOutcome;
use crate::reporting::RouteReporter;

/// Trait for card-collecting route planners
pub trait RouteSolver {
    /// Plan a route from the library `start`, streaming progress to `reporter`.
    ///
    /// Incomplete routes are reported through `PlanOutcome::status`; only
    /// setup problems are errors.
    fn plan(&self, start: &str, reporter: &mut dyn RouteReporter)
        -> Result<PlanOutcome, PlanError>;
}
