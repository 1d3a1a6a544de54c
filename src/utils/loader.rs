use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::models::{Card, CardId, Coordinates, Library, LocationId};
use crate::utils::config::PlannerConfig;

/// Reference tables for one planning run, already filtered
#[derive(Debug, Clone, Default)]
pub struct MapData {
    pub cards: HashMap<CardId, Card>,
    pub libraries: HashMap<LocationId, Library>,
}

#[derive(Debug, Deserialize)]
struct CardRow {
    card_id: String,
    card: String,
}

#[derive(Debug, Deserialize)]
struct LibraryRow {
    lib_id: String,
    #[serde(default)]
    latitude: String,
    #[serde(default)]
    longitude: String,
    #[serde(default)]
    card: String,
    #[serde(default)]
    name: String,
}

// Load both catalogs for a run
pub fn load_map<P: AsRef<Path>, Q: AsRef<Path>>(
    cards_path: P,
    libraries_path: Q,
    config: &PlannerConfig,
) -> Result<MapData, LoadError> {
    let cards = load_cards(cards_path, config)?;
    info!("loaded {} cards", cards.len());

    let libraries = load_libraries(libraries_path, config)?;
    info!("loaded {} libraries", libraries.len());

    Ok(MapData { cards, libraries })
}

pub fn load_cards<P: AsRef<Path>>(
    path: P,
    config: &PlannerConfig,
) -> Result<HashMap<CardId, Card>, LoadError> {
    read_cards(open(path.as_ref())?, config)
}

pub fn load_libraries<P: AsRef<Path>>(
    path: P,
    config: &PlannerConfig,
) -> Result<HashMap<LocationId, Library>, LoadError> {
    read_libraries(open(path.as_ref())?, config)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Reads the card catalog, keeping only ids allowed by `include_cards`
pub fn read_cards<R: Read>(
    reader: R,
    config: &PlannerConfig,
) -> Result<HashMap<CardId, Card>, LoadError> {
    let filter = config.card_filter();
    let mut cards = HashMap::new();

    for row in csv_reader(reader).deserialize() {
        let row: CardRow = row?;
        if let Some(allowed) = &filter {
            if !allowed.contains(row.card_id.as_str()) {
                continue;
            }
        }
        cards.insert(row.card_id.clone(), Card::new(row.card_id, row.card));
    }

    Ok(cards)
}

/// Reads the library table.
///
/// Rows with an empty latitude or longitude are skipped, as are rows not
/// allowed by `include_libraries`. A coordinate that is present but not a
/// decimal number is an error.
pub fn read_libraries<R: Read>(
    reader: R,
    config: &PlannerConfig,
) -> Result<HashMap<LocationId, Library>, LoadError> {
    let filter = config.library_filter();
    let mut libraries = HashMap::new();

    for row in csv_reader(reader).deserialize() {
        let row: LibraryRow = row?;
        if row.latitude.is_empty() || row.longitude.is_empty() {
            debug!(library = %row.lib_id, "missing coordinates, skipping");
            continue;
        }
        if let Some(allowed) = &filter {
            if !allowed.contains(row.lib_id.as_str()) {
                continue;
            }
        }

        let latitude = parse_coordinate(&row.lib_id, "latitude", &row.latitude)?;
        let longitude = parse_coordinate(&row.lib_id, "longitude", &row.longitude)?;
        let card = if row.card.is_empty() {
            None
        } else {
            Some(row.card)
        };

        let library = Library::new(
            row.lib_id.clone(),
            Coordinates::new(latitude, longitude),
            card,
            row.name,
        );
        if libraries.insert(row.lib_id.clone(), library).is_some() {
            warn!(library = %row.lib_id, "duplicate library id, keeping the later row");
        }
    }

    Ok(libraries)
}

fn parse_coordinate(library: &str, field: &'static str, value: &str) -> Result<Decimal, LoadError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| LoadError::InvalidCoordinate {
            library: library.to_string(),
            field,
            value: value.to_string(),
        })
}
