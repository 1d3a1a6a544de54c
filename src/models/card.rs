// Card model representing the collectible offered by a library

use crate::models::CardId;

/// A collectible card type from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Catalog key (`card_id` column)
    pub id: CardId,

    /// Display name (`card` column)
    pub label: String,
}

impl Card {
    /// Creates a new card with the given id and label
    pub fn new<I: Into<CardId>, S: Into<String>>(id: I, label: S) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
