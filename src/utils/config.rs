// Planner configuration loaded from JSON

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::error::LoadError;
use crate::models::{CardId, LocationId};

/// Library used as the starting point when none is configured
pub const DEFAULT_START_LIBRARY: &str = "22";

/// Candidates at or beyond this distance are never selected
pub const DEFAULT_DISTANCE_CEILING: Decimal = Decimal::TEN;

/// Extra loop iterations allowed beyond the number of demanded cards
pub const DEFAULT_ITERATION_SLACK: usize = 10;

/// Recognized configuration keys; anything else in the document is ignored
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Card ids to keep; empty keeps every card
    #[serde(deserialize_with = "id_list")]
    pub include_cards: Vec<CardId>,

    /// Library ids to keep; empty keeps every library
    #[serde(deserialize_with = "id_list")]
    pub include_libraries: Vec<LocationId>,

    #[serde(deserialize_with = "id_value")]
    pub start_library: LocationId,

    /// Read as an exact decimal from a JSON number or string
    pub distance_ceiling: Decimal,

    pub iteration_slack: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            include_cards: Vec::new(),
            include_libraries: Vec::new(),
            start_library: DEFAULT_START_LIBRARY.to_string(),
            distance_ceiling: DEFAULT_DISTANCE_CEILING,
            iteration_slack: DEFAULT_ITERATION_SLACK,
        }
    }
}

impl PlannerConfig {
    /// Reads and validates a JSON config file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json_str = fs::read_to_string(path)
            .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&json_str)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses and validates a JSON config document
    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let config: PlannerConfig = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.distance_ceiling <= Decimal::ZERO {
            return Err(LoadError::Config(format!(
                "distance_ceiling must be a positive number, got {}",
                self.distance_ceiling
            )));
        }
        if self.start_library.is_empty() {
            return Err(LoadError::Config("start_library must not be empty".into()));
        }
        Ok(())
    }

    /// Card filter as a set; `None` when every card is included
    pub fn card_filter(&self) -> Option<HashSet<&str>> {
        as_filter(&self.include_cards)
    }

    /// Library filter as a set; `None` when every library is included
    pub fn library_filter(&self) -> Option<HashSet<&str>> {
        as_filter(&self.include_libraries)
    }
}

fn as_filter(ids: &[String]) -> Option<HashSet<&str>> {
    if ids.is_empty() {
        None
    } else {
        Some(ids.iter().map(String::as_str).collect())
    }
}

// Ids may be written as JSON strings or integers; both compare as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn id_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    RawId::deserialize(deserializer).map(String::from)
}

fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let raw: Option<Vec<RawId>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults_for_empty_document() {
        let config = PlannerConfig::from_json("{}").unwrap();

        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.start_library, "22");
        assert_eq!(config.distance_ceiling, Decimal::from(10));
        assert_eq!(config.iteration_slack, 10);
        assert!(config.card_filter().is_none());
        assert!(config.library_filter().is_none());
    }

    #[test]
    fn test_mixed_id_types() {
        let config = PlannerConfig::from_json(
            r#"{
                "include_cards": ["3", 7],
                "include_libraries": [22, "21"],
                "start_library": 21,
                "unknown_key": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.include_cards, vec!["3".to_string(), "7".to_string()]);
        assert_eq!(config.include_libraries, vec!["22".to_string(), "21".to_string()]);
        assert_eq!(config.start_library, "21");
        assert!(config.card_filter().unwrap().contains("7"));
    }

    #[test]
    fn test_null_filter_means_include_all() {
        let config = PlannerConfig::from_json(r#"{"include_cards": null}"#).unwrap();
        assert!(config.card_filter().is_none());
    }

    #[test]
    fn test_rejects_non_positive_ceiling() {
        let err = PlannerConfig::from_json(r#"{"distance_ceiling": 0}"#).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));

        let err = PlannerConfig::from_json(r#"{"distance_ceiling": -2.5}"#).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_ceiling_is_read_exactly() {
        let expected = Decimal::from_str("0.3").unwrap();

        let config = PlannerConfig::from_json(r#"{"distance_ceiling": 0.3}"#).unwrap();
        assert_eq!(config.distance_ceiling, expected);

        let config = PlannerConfig::from_json(r#"{"distance_ceiling": "0.3"}"#).unwrap();
        assert_eq!(config.distance_ceiling, expected);

        let config = PlannerConfig::from_json(r#"{"distance_ceiling": 1e15}"#).unwrap();
        assert_eq!(config.distance_ceiling, Decimal::from(10_i64.pow(15)));
    }

    #[test]
    fn test_unrepresentable_ceiling_is_fatal() {
        let err = PlannerConfig::from_json(r#"{"distance_ceiling": 1e300}"#).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));

        let err = PlannerConfig::from_json(r#"{"distance_ceiling": "ten"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let err = PlannerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }
}
