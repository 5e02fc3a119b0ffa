//! Geographic coordinate value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A WGS84 latitude/longitude pair.
///
/// Persisted and displayed as `"<lat>, <lng>"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates coordinates, rejecting values outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::out_of_range("latitude", -90.0, 90.0, latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::out_of_range(
                "longitude", -180.0, 180.0, longitude,
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Formats the pair the way distance providers expect it (`lat,lng`).
    pub fn to_query_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Lenient parse used for stored values: whitespace around the comma is ignored.
///
/// User input goes through the stricter pattern in `dialogue::input`.
impl FromStr for Coordinates {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let (lat, lng) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lng), None) if !lat.is_empty() && !lng.is_empty() => (lat, lng),
            _ => {
                return Err(ValidationError::invalid_format(
                    "coordinates",
                    "expected two comma separated components",
                ))
            }
        };
        let latitude = lat
            .parse::<f64>()
            .map_err(|e| ValidationError::invalid_format("latitude", e.to_string()))?;
        let longitude = lng
            .parse::<f64>()
            .map_err(|e| ValidationError::invalid_format("longitude", e.to_string()))?;
        Coordinates::new(latitude, longitude)
    }
}
