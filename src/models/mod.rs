// Models module - exports all model types

mod card;
mod demand;
mod library;
mod location;
mod route;

// Re-export model types
pub use self::card::Card;
pub use self::demand::DemandSet;
pub use self::library::Library;
pub use self::location::Coordinates;
pub use self::route::{PlanOutcome, PlanStatus, Route, RouteStop};

// Common type aliases for improved code readability
pub type CardId = String;
pub type LocationId = String;
