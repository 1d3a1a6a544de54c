// Route models for representing a planned card-collecting route

use crate::models::{CardId, LocationId};
use std::fmt;

/// One visit along the route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStop {
    /// Library visited
    pub library: LocationId,

    /// Card collected there
    pub card: CardId,

    /// Planar distance travelled from the previous stop (or the start)
    pub distance: f64,
}

/// Append-only visitation order. A library never appears twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    stops: Vec<RouteStop>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stop. Returns false, leaving the route unchanged, if the
    /// library is already on the route.
    pub fn push(&mut self, stop: RouteStop) -> bool {
        if self.contains(&stop.library) {
            return false;
        }
        self.stops.push(stop);
        true
    }

    pub fn contains(&self, library: &str) -> bool {
        self.stops.iter().any(|stop| stop.library == library)
    }

    pub fn stops(&self) -> &[RouteStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Library ids in visitation order
    pub fn library_ids(&self) -> Vec<LocationId> {
        self.stops.iter().map(|stop| stop.library.clone()).collect()
    }

    /// Cards collected in visitation order
    pub fn collected_cards(&self) -> Vec<CardId> {
        self.stops.iter().map(|stop| stop.card.clone()).collect()
    }

    /// Sum of all leg distances
    pub fn total_distance(&self) -> f64 {
        self.stops.iter().map(|stop| stop.distance).sum()
    }
}

/// Terminal state of a planning run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStatus {
    /// Every demanded card was collected
    Success,
    /// Demand remains but no candidate is within the ceiling
    Stalled,
    /// The iteration budget was exceeded
    Aborted,
}

impl PlanStatus {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            PlanStatus::Success => 0,
            PlanStatus::Stalled => 1,
            PlanStatus::Aborted => 2,
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlanStatus::Success => "success",
            PlanStatus::Stalled => "stalled",
            PlanStatus::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Result of a planning run, including partial routes
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub status: PlanStatus,

    /// Libraries visited, in order
    pub route: Route,

    /// Cards still needed when the loop stopped (empty on success)
    pub unmet: Vec<CardId>,

    /// Loop iterations after the initial step
    pub iterations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(library: &str, card: &str, distance: f64) -> RouteStop {
        RouteStop {
            library: library.to_string(),
            card: card.to_string(),
            distance,
        }
    }

    #[test]
    fn test_push_rejects_duplicate_library() {
        let mut route = Route::new();

        assert!(route.push(stop("1", "X", 0.0)));
        assert!(route.push(stop("2", "Y", 1.5)));
        assert!(!route.push(stop("1", "Z", 2.0)));

        assert_eq!(route.library_ids(), vec!["1".to_string(), "2".to_string()]);
        assert_eq!(route.collected_cards(), vec!["X".to_string(), "Y".to_string()]);
    }

    #[test]
    fn test_total_distance() {
        let mut route = Route::new();
        route.push(stop("1", "X", 0.5));
        route.push(stop("2", "Y", 1.5));

        assert_eq!(route.total_distance(), 2.0);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PlanStatus::Success.exit_code(), 0);
        assert_eq!(PlanStatus::Stalled.exit_code(), 1);
        assert_eq!(PlanStatus::Aborted.exit_code(), 2);
        assert_eq!(PlanStatus::Stalled.to_string(), "stalled");
    }
}
