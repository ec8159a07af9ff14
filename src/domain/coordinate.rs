use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A WGS84 point picked on the map or reported by a location fix.
///
/// Range is not validated here; callers decide whether to accept a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate {input:?}: expected \"LAT,LNG\"")]
pub struct ParseCoordinateError {
    input: String,
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parse `"lat,lng"` with optional whitespace around either number.
    /// NaN and infinities are rejected; range is not checked.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordinateError {
            input: s.to_string(),
        };

        let (lat, lng) = s.split_once(',').ok_or_else(err)?;
        let lat: f64 = lat.trim().parse().map_err(|_| err())?;
        let lng: f64 = lng.trim().parse().map_err(|_| err())?;

        if !lat.is_finite() || !lng.is_finite() {
            return Err(err());
        }

        Ok(Self { lat, lng })
    }
}
