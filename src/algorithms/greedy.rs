use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::algorithms::nearest::find_nearest;
use crate::algorithms::RouteSolver;
use crate::error::PlanError;
use crate::models::{
    Card, CardId, Coordinates, DemandSet, Library, LocationId, PlanOutcome, PlanStatus, Route,
    RouteStop,
};
use crate::reporting::RouteReporter;
use crate::utils::config::{PlannerConfig, DEFAULT_DISTANCE_CEILING, DEFAULT_ITERATION_SLACK};

#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    /// Candidates must be strictly closer than this
    pub distance_ceiling: Decimal,
    /// Loop iterations allowed beyond the number of demanded cards
    pub iteration_slack: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            distance_ceiling: DEFAULT_DISTANCE_CEILING,
            iteration_slack: DEFAULT_ITERATION_SLACK,
        }
    }
}

impl PlanOptions {
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            distance_ceiling: config.distance_ceiling,
            iteration_slack: config.iteration_slack,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanState {
    Seeking,
    Success,
    Stalled,
    Aborted,
}

/// Greedy nearest-library planner.
///
/// From the start it repeatedly walks to the closest library offering a card
/// that is still needed, until every card is collected (`Success`), nothing
/// is in reach (`Stalled`) or the iteration budget runs out (`Aborted`).
#[derive(Debug, Clone)]
pub struct GreedyPlanner<'a> {
    pub cards: &'a HashMap<CardId, Card>,
    pub libraries: &'a HashMap<LocationId, Library>,
    pub options: PlanOptions,
}

impl<'a> GreedyPlanner<'a> {
    pub fn new(
        cards: &'a HashMap<CardId, Card>,
        libraries: &'a HashMap<LocationId, Library>,
        options: PlanOptions,
    ) -> Self {
        Self {
            cards,
            libraries,
            options,
        }
    }

    /// Selects the next library from `origin`, records the visit and
    /// consumes its card.
    fn step(
        &self,
        origin: &mut Coordinates,
        demand: &mut DemandSet,
        route: &mut Route,
        reporter: &mut dyn RouteReporter,
    ) -> PlanState {
        let candidates = demand.candidate_locations();
        let Some(nearest) = find_nearest(
            origin,
            &candidates,
            self.libraries,
            self.options.distance_ceiling,
        ) else {
            return PlanState::Stalled;
        };

        let Some(library) = self.libraries.get(&nearest.library) else {
            return PlanState::Stalled;
        };
        let Some(card) = library.card.clone() else {
            warn!(library = %library.id, "selected library offers no card");
            return PlanState::Seeking;
        };

        let stop = RouteStop {
            library: library.id.clone(),
            card: card.clone(),
            distance: nearest.distance(),
        };
        if !route.push(stop.clone()) {
            warn!(library = %library.id, "library already on route");
            return PlanState::Seeking;
        }
        demand.satisfy(&card);
        *origin = library.coordinates;

        debug!(
            library = %library.id,
            card = %card,
            distance = stop.distance,
            remaining = demand.len(),
            "visited library"
        );
        reporter.visited(&stop);

        if demand.is_empty() {
            PlanState::Success
        } else {
            PlanState::Seeking
        }
    }
}

impl RouteSolver for GreedyPlanner<'_> {
    fn plan(
        &self,
        start: &str,
        reporter: &mut dyn RouteReporter,
    ) -> Result<PlanOutcome, PlanError> {
        let start_library = self
            .libraries
            .get(start)
            .ok_or_else(|| PlanError::UnknownStart(start.to_string()))?;

        let mut demand = DemandSet::build(self.cards, self.libraries);
        let budget = demand.len() + self.options.iteration_slack;
        let unsatisfiable = demand.unsatisfiable();
        if !unsatisfiable.is_empty() {
            info!(cards = ?unsatisfiable, "some cards are offered by no library");
        }
        info!(
            start = %start_library.id,
            cards = demand.len(),
            budget,
            "planning route"
        );
        reporter.started(start_library);

        let mut route = Route::new();
        let mut origin = start_library.coordinates;
        let mut iterations = 0;

        let mut state = if demand.is_empty() {
            PlanState::Success
        } else {
            self.step(&mut origin, &mut demand, &mut route, reporter)
        };

        while state == PlanState::Seeking {
            iterations += 1;
            if iterations > budget {
                state = PlanState::Aborted;
                break;
            }
            state = self.step(&mut origin, &mut demand, &mut route, reporter);
        }

        let unmet = demand.unmet();
        let status = match state {
            PlanState::Success => {
                info!(stops = route.len(), "collected every card");
                reporter.success(&route);
                PlanStatus::Success
            }
            PlanState::Stalled => {
                warn!(stops = route.len(), unmet = unmet.len(), "no reachable library left");
                reporter.stalled(&route, &unmet);
                PlanStatus::Stalled
            }
            PlanState::Aborted | PlanState::Seeking => {
                warn!(iterations, budget, "iteration budget exceeded");
                reporter.aborted(&route, &unmet);
                PlanStatus::Aborted
            }
        };

        Ok(PlanOutcome {
            status,
            route,
            unmet,
            iterations,
        })
    }
}
