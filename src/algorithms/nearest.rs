// Nearest-library selection under a distance ceiling

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{Coordinates, Library, LocationId};
use crate::utils::distance::{ceiling_squared, squared_euclidean, to_distance};

/// The selected library and its exact squared distance from the origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nearest {
    pub library: LocationId,
    pub squared_distance: Decimal,
}

impl Nearest {
    pub fn distance(&self) -> f64 {
        to_distance(self.squared_distance)
    }
}

/// Finds the candidate closest to `origin` whose distance is strictly below
/// `ceiling`.
///
/// Candidates are scanned in ascending id order and only a strictly smaller
/// distance replaces the current best, so on exact ties the smallest id wins.
/// Candidate ids missing from `libraries` are skipped. A ceiling whose square
/// overflows `Decimal` places no bound on the distance.
pub fn find_nearest(
    origin: &Coordinates,
    candidates: &BTreeSet<LocationId>,
    libraries: &HashMap<LocationId, Library>,
    ceiling: Decimal,
) -> Option<Nearest> {
    let mut best_squared = ceiling_squared(ceiling).unwrap_or(Decimal::MAX);
    let mut best: Option<&LocationId> = None;

    for library_id in candidates {
        let Some(library) = libraries.get(library_id) else {
            warn!(library = %library_id, "candidate missing from library table");
            continue;
        };
        let Some(squared) = squared_euclidean(origin, &library.coordinates) else {
            continue;
        };
        if squared < best_squared {
            best_squared = squared;
            best = Some(library_id);
        }
    }

    best.map(|library_id| Nearest {
        library: library_id.clone(),
        squared_distance: best_squared,
    })
}
