// Distance calculation utilities

use crate::models::Coordinates;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Squared planar Euclidean distance between two points, exact
pub fn squared_euclidean(p1: &Coordinates, p2: &Coordinates) -> Option<Decimal> {
    p1.squared_distance_to(p2)
}

/// Converts a squared distance back to a float distance
pub fn to_distance(squared: Decimal) -> f64 {
    squared.to_f64().map(f64::sqrt).unwrap_or(f64::INFINITY)
}

/// Square of a distance ceiling, so comparisons stay in squared space.
/// `d < c` iff `d^2 < c^2` for non-negative values.
pub fn ceiling_squared(ceiling: Decimal) -> Option<Decimal> {
    ceiling.checked_mul(ceiling)
}
