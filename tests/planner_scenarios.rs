// Integration tests for the greedy planner: fixed scenarios and randomized
// properties over generated maps
use card_route::algorithms::nearest::find_nearest;
use card_route::models::{Card, CardId, Coordinates, Library, LocationId, PlanStatus};
use card_route::reporting::{RecordingReporter, ReportEvent, SilentReporter};
use card_route::{GreedyPlanner, PlanOptions, RouteSolver};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;

type Catalog = (HashMap<CardId, Card>, HashMap<LocationId, Library>);

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

fn build_map(cards: &[&str], libraries: &[(&str, &str, &str, Option<&str>)]) -> Catalog {
    let cards = cards
        .iter()
        .map(|id| (id.to_string(), Card::new(*id, format!("Card {}", id))))
        .collect();
    let libraries = libraries
        .iter()
        .map(|(id, lat, lon, card)| {
            let library = Library::new(
                *id,
                Coordinates::new(dec(lat), dec(lon)),
                card.map(str::to_string),
                format!("Library {}", id),
            );
            (id.to_string(), library)
        })
        .collect();
    (cards, libraries)
}

// Random map on a 0..20 degree square with coordinates at 0.01 resolution.
// Some libraries reference a card missing from the catalog and some offer none.
fn random_map(rng: &mut StdRng, card_count: usize, library_count: usize) -> Catalog {
    let cards: HashMap<CardId, Card> = (0..card_count)
        .map(|i| {
            let id = format!("c{}", i);
            (id.clone(), Card::new(id, format!("Card {}", i)))
        })
        .collect();

    let libraries = (0..library_count)
        .map(|i| {
            let id = format!("l{}", i);
            let coordinates = Coordinates::new(
                Decimal::new(rng.gen_range(0..2000), 2),
                Decimal::new(rng.gen_range(0..2000), 2),
            );
            let card = match rng.gen_range(0..10) {
                0 => None,
                1 => Some("retired".to_string()),
                _ => Some(format!("c{}", rng.gen_range(0..card_count))),
            };
            (id.clone(), Library::new(id, coordinates, card, format!("Library {}", i)))
        })
        .collect();

    (cards, libraries)
}

#[test]
fn scenario_a_collects_every_card_nearest_first() {
    let (cards, libraries) = build_map(
        &["X", "Y", "Z"],
        &[
            ("start", "42.00", "-71.00", Some("X")),
            ("y", "42.50", "-71.00", Some("Y")),
            ("z", "42.10", "-71.10", Some("Z")),
        ],
    );
    let planner = GreedyPlanner::new(&cards, &libraries, PlanOptions::default());

    let outcome = planner.plan("start", &mut SilentReporter).unwrap();

    assert_eq!(outcome.status, PlanStatus::Success);
    assert_eq!(outcome.route.library_ids(), vec!["start", "z", "y"]);
    assert_eq!(outcome.route.collected_cards(), vec!["X", "Z", "Y"]);
    assert!(outcome.unmet.is_empty());
}

#[test]
fn scenario_b_card_without_offering_library_stalls() {
    let (cards, libraries) = build_map(
        &["X", "Y", "ghost"],
        &[
            ("start", "0", "0", None),
            ("x", "1", "0", Some("X")),
            ("y", "2", "0", Some("Y")),
        ],
    );
    let planner = GreedyPlanner::new(&cards, &libraries, PlanOptions::default());

    let outcome = planner.plan("start", &mut SilentReporter).unwrap();

    assert_eq!(outcome.status, PlanStatus::Stalled);
    assert_eq!(outcome.route.library_ids(), vec!["x", "y"]);
    assert_eq!(outcome.unmet, vec!["ghost".to_string()]);
}

#[test]
fn scenario_c_colocated_libraries_are_both_visited() {
    let (cards, libraries) = build_map(
        &["X", "Y", "Z"],
        &[
            ("start", "0", "0", None),
            ("b", "1.5", "1.5", Some("Y")),
            ("a", "1.5", "1.5", Some("X")),
            ("c", "3", "3", Some("Z")),
        ],
    );
    let planner = GreedyPlanner::new(&cards, &libraries, PlanOptions::default());

    let outcome = planner.plan("start", &mut SilentReporter).unwrap();

    assert_eq!(outcome.status, PlanStatus::Success);
    let first_two: HashSet<_> = outcome.route.library_ids()[..2].iter().cloned().collect();
    assert_eq!(first_two, HashSet::from(["a".to_string(), "b".to_string()]));
    assert_eq!(outcome.route.stops()[1].distance, 0.0);
    assert_eq!(outcome.route.library_ids()[2], "c");
}

#[test]
fn scenario_d_everything_out_of_reach() {
    let (cards, libraries) = build_map(
        &["X", "Y"],
        &[
            ("start", "0", "0", None),
            ("x", "10", "0", Some("X")),
            ("y", "-8", "-8", Some("Y")),
        ],
    );
    let planner = GreedyPlanner::new(&cards, &libraries, PlanOptions::default());
    let mut reporter = RecordingReporter::default();

    let outcome = planner.plan("start", &mut reporter).unwrap();

    assert_eq!(outcome.status, PlanStatus::Stalled);
    assert_eq!(outcome.iterations, 0);
    assert!(outcome.route.is_empty());
    assert_eq!(outcome.unmet, vec!["X".to_string(), "Y".to_string()]);
    assert_eq!(
        reporter.events,
        vec![
            ReportEvent::Started("start".to_string()),
            ReportEvent::Stalled(vec!["X".to_string(), "Y".to_string()]),
        ]
    );
}

#[test]
fn unknown_catalog_card_does_not_stop_planning() {
    let (cards, libraries) = build_map(
        &["X"],
        &[
            ("start", "0", "0", None),
            ("filtered", "0.1", "0", Some("W")),
            ("x", "1", "0", Some("X")),
        ],
    );
    let planner = GreedyPlanner::new(&cards, &libraries, PlanOptions::default());

    let outcome = planner.plan("start", &mut SilentReporter).unwrap();

    assert_eq!(outcome.status, PlanStatus::Success);
    assert_eq!(outcome.route.library_ids(), vec!["x"]);
}

#[test]
fn random_maps_respect_route_invariants() {
    let mut rng = StdRng::seed_from_u64(20261016);
    let options = PlanOptions::default();
    let ceiling_squared = options.distance_ceiling * options.distance_ceiling;

    for _ in 0..200 {
        let card_count = rng.gen_range(1..12);
        let library_count = rng.gen_range(1..40);
        let (cards, libraries) = random_map(&mut rng, card_count, library_count);
        let start = format!("l{}", rng.gen_range(0..library_count));

        let planner = GreedyPlanner::new(&cards, &libraries, options.clone());
        let outcome = planner.plan(&start, &mut SilentReporter).unwrap();

        // No library visited twice
        let ids = outcome.route.library_ids();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());

        // Collected cards are distinct catalog cards; together with the unmet
        // cards they cover the catalog exactly
        let collected: BTreeSet<_> = outcome.route.collected_cards().into_iter().collect();
        assert_eq!(collected.len(), outcome.route.len());
        let unmet: BTreeSet<_> = outcome.unmet.iter().cloned().collect();
        assert!(collected.is_disjoint(&unmet));
        let catalog: BTreeSet<_> = cards.keys().cloned().collect();
        let covered: BTreeSet<_> = collected.union(&unmet).cloned().collect();
        assert_eq!(covered, catalog);

        match outcome.status {
            PlanStatus::Success => assert_eq!(collected, catalog),
            _ => assert!(collected.len() < catalog.len()),
        }
        assert_ne!(outcome.status, PlanStatus::Aborted);
        assert!(outcome.iterations <= card_count + options.iteration_slack + 1);

        // Every hop is strictly inside the ceiling
        let mut origin = libraries[&start].coordinates;
        for stop in outcome.route.stops() {
            let next = libraries[&stop.library].coordinates;
            assert!(origin.squared_distance_to(&next).unwrap() < ceiling_squared);
            origin = next;
        }
    }
}

#[test]
fn nearest_distance_is_independent_of_labels() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..100 {
        let count = rng.gen_range(1..25);
        let points: Vec<Coordinates> = (0..count)
            .map(|_| {
                Coordinates::new(
                    Decimal::new(rng.gen_range(-500..500), 2),
                    Decimal::new(rng.gen_range(-500..500), 2),
                )
            })
            .collect();
        let origin = Coordinates::new(Decimal::ZERO, Decimal::ZERO);

        let label = |names: &[String]| -> (BTreeSet<LocationId>, HashMap<LocationId, Library>) {
            let libraries: HashMap<_, _> = names
                .iter()
                .zip(&points)
                .map(|(name, coords)| {
                    let library = Library::new(name.clone(), *coords, Some("X".into()), name.clone());
                    (name.clone(), library)
                })
                .collect();
            (names.iter().cloned().collect(), libraries)
        };

        let mut names: Vec<String> = (0..count).map(|i| format!("n{:03}", i)).collect();
        let (candidates, libraries) = label(&names);
        let first = find_nearest(&origin, &candidates, &libraries, Decimal::TEN);

        names.shuffle(&mut rng);
        let (candidates, libraries) = label(&names);
        let second = find_nearest(&origin, &candidates, &libraries, Decimal::TEN);

        assert_eq!(
            first.map(|n| n.squared_distance),
            second.map(|n| n.squared_distance)
        );
    }
}

#[test]
fn candidate_index_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(99);
    let (cards, libraries) = random_map(&mut rng, 6, 30);
    let demand = card_route::DemandSet::build(&cards, &libraries);

    assert_eq!(demand.candidate_locations(), demand.candidate_locations());
    for library_id in demand.candidate_locations() {
        let card = libraries[&library_id].card.as_ref().unwrap();
        assert!(cards.contains_key(card));
    }
}
