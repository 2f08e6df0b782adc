use serde::{Deserialize, Serialize};

use super::modulo;

/// Geographic (or celestial) position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Same point with longitude folded into `(-180, 180]`
    pub fn normalized(self) -> Self {
        let mut longitude = modulo(self.longitude, 360.0);
        if longitude > 180.0 {
            longitude -= 360.0;
        }
        Self {
            longitude,
            latitude: self.latitude,
        }
    }
}
