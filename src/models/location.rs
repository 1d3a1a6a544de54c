// Location model representing exact (latitude, longitude) coordinates

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Represents a point as raw (latitude, longitude) decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl Coordinates {
    /// Creates a new coordinate pair
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Squared planar distance, computed exactly.
    /// Returns `None` if the decimal arithmetic overflows.
    pub fn squared_distance_to(&self, other: &Coordinates) -> Option<Decimal> {
        let d_lat = other.latitude.checked_sub(self.latitude)?;
        let d_lon = other.longitude.checked_sub(self.longitude)?;
        d_lat
            .checked_mul(d_lat)?
            .checked_add(d_lon.checked_mul(d_lon)?)
    }

    /// (longitude, latitude) as floats, x/y order for plotting
    pub fn as_xy(&self) -> (f64, f64) {
        (
            self.longitude.to_f64().unwrap_or_default(),
            self.latitude.to_f64().unwrap_or_default(),
        )
    }
}
