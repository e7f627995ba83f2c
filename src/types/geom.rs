use std::{fmt, str::FromStr};

use color_eyre::eyre::{self, eyre};
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A coordinate in degrees, shaped like the `lat`/`lng` query of the landmarks endpoint
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for Point<f64> {
    fn from(value: LatLng) -> Self {
        Point::new(value.lng, value.lat)
    }
}

impl From<Point<f64>> for LatLng {
    fn from(value: Point<f64>) -> Self {
        LatLng::new(value.y(), value.x())
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`, whitespace around either half allowed
impl FromStr for LatLng {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or(eyre!("expected \"lat,lng\", got {s:?}"))?;
        Ok(LatLng::new(lat.trim().parse()?, lng.trim().parse()?))
    }
}
