// Library model representing a visitable location offering one card

use crate::models::{CardId, Coordinates, LocationId};

/// Represents a library where a card can be collected
#[derive(Debug, Clone, PartialEq)]
pub struct Library {
    /// Unique identifier for the library (`lib_id` column)
    pub id: LocationId,

    /// Position of the library
    pub coordinates: Coordinates,

    /// Card offered here, if any
    pub card: Option<CardId>,

    /// Display name
    pub name: String,
}

impl Library {
    /// Creates a new library offering the given card
    pub fn new<I, S>(id: I, coordinates: Coordinates, card: Option<CardId>, name: S) -> Self
    where
        I: Into<LocationId>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            coordinates,
            card,
            name: name.into(),
        }
    }
}
