use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RadarError;

/// Viewport span used when a region is built around a single position.
pub const DEFAULT_REGION_DELTA: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, RadarError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(RadarError::InvalidRegion(format!(
                "latitude {latitude} out of range -90..=90"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(RadarError::InvalidRegion(format!(
                "longitude {longitude} out of range -180..=180"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// A map viewport: center plus the span shown on each axis.
///
/// Both deltas are strictly positive; construction goes through
/// [`Region::new`] or [`Region::around`], which enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    latitude: f64,
    longitude: f64,
    latitude_delta: f64,
    longitude_delta: f64,
}

impl Region {
    pub fn new(
        latitude: f64,
        longitude: f64,
        latitude_delta: f64,
        longitude_delta: f64,
    ) -> Result<Self, RadarError> {
        Coordinates::new(latitude, longitude)?;
        for (name, delta) in [
            ("latitude_delta", latitude_delta),
            ("longitude_delta", longitude_delta),
        ] {
            if !delta.is_finite() || delta <= 0.0 {
                return Err(RadarError::InvalidRegion(format!(
                    "{name} must be > 0, got {delta}"
                )));
            }
        }
        Ok(Self {
            latitude,
            longitude,
            latitude_delta,
            longitude_delta,
        })
    }

    /// Square viewport centered on `center`.
    pub fn around(center: Coordinates, delta: f64) -> Result<Self, RadarError> {
        Self::new(center.latitude, center.longitude, delta, delta)
    }

    pub fn center(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_delta(&self) -> f64 {
        self.latitude_delta
    }

    pub fn longitude_delta(&self) -> f64 {
        self.longitude_delta
    }

    /// Whether `other` differs enough from `self` to count as a new viewport.
    ///
    /// `min_shift` is a fraction of the current span: the center must move
    /// further than `min_shift * delta` on an axis, or a delta must change by
    /// more than that ratio. A `min_shift` of 0 treats any change as meaningful.
    pub fn differs_meaningfully(&self, other: &Region, min_shift: f64) -> bool {
        let lat_shift = (self.latitude - other.latitude).abs();
        let lon_shift = (self.longitude - other.longitude).abs();
        if lat_shift > min_shift * self.latitude_delta
            || lon_shift > min_shift * self.longitude_delta
        {
            return true;
        }
        let lat_zoom = (other.latitude_delta / self.latitude_delta - 1.0).abs();
        let lon_zoom = (other.longitude_delta / self.longitude_delta - 1.0).abs();
        lat_zoom > min_shift || lon_zoom > min_shift
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (±{:.4}, ±{:.4})",
            self.center(),
            self.latitude_delta,
            self.longitude_delta
        )
    }
}

#[derive(Deserialize)]
struct RawRegion {
    latitude: f64,
    longitude: f64,
    latitude_delta: f64,
    longitude_delta: f64,
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawRegion::deserialize(deserializer)?;
        Region::new(
            raw.latitude,
            raw.longitude,
            raw.latitude_delta,
            raw.longitude_delta,
        )
        .map_err(serde::de::Error::custom)
    }
}
