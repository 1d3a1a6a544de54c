//! Reporting of planning progress and results.
//!
//! The planner emits structured events through [`RouteReporter`]; rendering is
//! left to the implementation so runs can be silent or recorded.

mod console;

pub use self::console::ConsoleReporter;

use std::collections::HashMap;

use crate::models::{Card, CardId, Library, LocationId, Route, RouteStop};

/// Receives planner events in order: `started`, zero or more `visited`, then
/// exactly one of `success`, `stalled` or `aborted`.
pub trait RouteReporter {
    fn started(&mut self, _start: &Library) {}

    fn visited(&mut self, _stop: &RouteStop) {}

    fn success(&mut self, _route: &Route) {}

    fn stalled(&mut self, _route: &Route, _unmet: &[CardId]) {}

    fn aborted(&mut self, _route: &Route, _unmet: &[CardId]) {}
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl RouteReporter for SilentReporter {}

/// A recorded planner event
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Started(LocationId),
    Visited(RouteStop),
    Success(Vec<LocationId>),
    Stalled(Vec<CardId>),
    Aborted(Vec<CardId>),
}

/// Keeps every event for later inspection
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RouteReporter for RecordingReporter {
    fn started(&mut self, start: &Library) {
        self.events.push(ReportEvent::Started(start.id.clone()));
    }

    fn visited(&mut self, stop: &RouteStop) {
        self.events.push(ReportEvent::Visited(stop.clone()));
    }

    fn success(&mut self, route: &Route) {
        self.events.push(ReportEvent::Success(route.library_ids()));
    }

    fn stalled(&mut self, _route: &Route, unmet: &[CardId]) {
        self.events.push(ReportEvent::Stalled(unmet.to_vec()));
    }

    fn aborted(&mut self, _route: &Route, unmet: &[CardId]) {
        self.events.push(ReportEvent::Aborted(unmet.to_vec()));
    }
}

/// (library name, card label) pairs for each stop, in visitation order.
/// Unknown ids fall back to the raw id.
pub fn route_report(
    route: &Route,
    cards: &HashMap<CardId, Card>,
    libraries: &HashMap<LocationId, Library>,
) -> Vec<(String, String)> {
    route
        .stops()
        .iter()
        .map(|stop| {
            let name = libraries
                .get(&stop.library)
                .map(|library| library.name.clone())
                .unwrap_or_else(|| stop.library.clone());
            (name, card_label(&stop.card, cards))
        })
        .collect()
}

/// Display labels for the given card ids
pub fn unmet_labels(unmet: &[CardId], cards: &HashMap<CardId, Card>) -> Vec<String> {
    unmet.iter().map(|card_id| card_label(card_id, cards)).collect()
}

fn card_label(card_id: &str, cards: &HashMap<CardId, Card>) -> String {
    cards
        .get(card_id)
        .map(|card| card.label.clone())
        .unwrap_or_else(|| card_id.to_string())
}
