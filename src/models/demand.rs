// Demand model tracking which cards are still needed and where to get them

use crate::models::{Card, CardId, Library, LocationId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Remaining demand: each still-needed card mapped to the libraries offering it.
///
/// Entries are removed as cards are collected and never re-added. A card whose
/// library set is empty can never be satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemandSet {
    pub cards: BTreeMap<CardId, BTreeSet<LocationId>>,
}

impl DemandSet {
    /// Builds the initial demand from the (filtered) catalog.
    ///
    /// Every catalog card gets an entry, even if no library offers it.
    /// Libraries with no card, or with a card absent from the catalog, are
    /// skipped.
    pub fn build(cards: &HashMap<CardId, Card>, libraries: &HashMap<LocationId, Library>) -> Self {
        let mut demand: BTreeMap<CardId, BTreeSet<LocationId>> = cards
            .keys()
            .map(|card_id| (card_id.clone(), BTreeSet::new()))
            .collect();

        for (library_id, library) in libraries {
            let Some(card_id) = library.card.as_ref() else {
                debug!(library = %library_id, "library offers no card, skipping");
                continue;
            };
            match demand.get_mut(card_id) {
                Some(offering) => {
                    offering.insert(library_id.clone());
                }
                None => {
                    debug!(
                        library = %library_id,
                        card = %card_id,
                        "card not in catalog, skipping library"
                    );
                }
            }
        }

        Self { cards: demand }
    }

    /// Union of the offering libraries over all remaining cards
    pub fn candidate_locations(&self) -> BTreeSet<LocationId> {
        self.cards.values().flatten().cloned().collect()
    }

    /// Marks a card as collected. Returns false if it was not demanded.
    pub fn satisfy(&mut self, card_id: &str) -> bool {
        self.cards.remove(card_id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards still needed
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Still-needed card ids in ascending order
    pub fn unmet(&self) -> Vec<CardId> {
        self.cards.keys().cloned().collect()
    }

    /// Cards that no library offers
    pub fn unsatisfiable(&self) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|(_, offering)| offering.is_empty())
            .map(|(card_id, _)| card_id.clone())
            .collect()
    }
}
