use crate::domain::Site;
use serde::Serialize;
use std::fmt;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parses `"lat,lon"`. Anything that is not two comma-separated finite
    /// numbers yields `None`.
    pub fn parse(geo: &str) -> Option<Self> {
        let (lat, lon) = geo.split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        Some(Self { lat, lon })
    }
}

/// Formats as `"lat,lon"` using the shortest round-tripping decimal form.
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Anything that can report where it is.
pub trait Locatable {
    fn coordinates(&self) -> Option<GeoPoint>;
}

/// Explicit coordinates win; otherwise the linked place answers.
impl Locatable for Site {
    fn coordinates(&self) -> Option<GeoPoint> {
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            return Some(GeoPoint::new(lat, lon));
        }

        self.location.as_ref().and_then(Locatable::coordinates)
    }
}

pub fn resolve_coordinates(site: &Site) -> Option<GeoPoint> {
    site.coordinates()
}
