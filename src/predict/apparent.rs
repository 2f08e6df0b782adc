use serde::Serialize;
use strum_macros::Display;

use crate::astro::{gmst, modulo, sun_position, GeoPoint, Vector3, EARTH_RADIUS_KM, SUN_RADIUS_KM};
use crate::predict::propagator::StateVector;

/// Shadow state of a satellite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Illumination {
    Umbra,
    Penumbra,
    Sunlit,
}

impl Illumination {
    /// Classify from the phase-angle margin `p` and the solar angular
    /// radius `psun` (degrees). `p == ±psun` falls in the penumbra.
    pub fn classify(p: f64, psun: f64) -> Illumination {
        if p < -psun {
            Illumination::Umbra
        } else if p > psun {
            Illumination::Sunlit
        } else {
            Illumination::Penumbra
        }
    }
}

/// Observer-frame view of one propagated sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApparentSatelliteState {
    pub mjd: f64,
    pub position: Vector3,
    pub velocity: Vector3,
    /// Geocentric distance (km)
    pub range_km: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub sub_point: GeoPoint,
    /// Angular radius of the Sun seen from the satellite (degrees)
    pub sun_radius_deg: f64,
    /// Angular radius of the Earth seen from the satellite (degrees)
    pub earth_radius_deg: f64,
    /// Sun-Earth separation seen from the satellite, less the Earth's
    /// angular radius (degrees). Negative once the Earth covers the Sun.
    pub phase_margin_deg: f64,
}

impl ApparentSatelliteState {
    pub fn illumination(&self) -> Illumination {
        Illumination::classify(self.phase_margin_deg, self.sun_radius_deg)
    }

    pub fn speed_km_s(&self) -> f64 {
        self.velocity.norm()
    }
}

/// Combine a propagated state at `mjd` with the solar ephemeris.
///
/// The sub-satellite longitude is taken against the sidereal time of
/// `reference_mjd`, so every sample of a track shares the frame's
/// Earth orientation.
pub fn apparent_state(state: &StateVector, mjd: f64, reference_mjd: f64) -> ApparentSatelliteState {
    let sun = sun_position(mjd);
    let sat = state.position;

    // Satellite to Sun
    let to_sun = sun.position.sub(&sat);
    let sun_distance = to_sun.norm();
    let range_km = sat.norm();

    let sun_radius_deg = (SUN_RADIUS_KM / sun_distance).asin().to_degrees();
    let earth_radius_deg = (EARTH_RADIUS_KM / range_km).clamp(-1.0, 1.0).asin().to_degrees();
    let cos_separation = (-to_sun.dot(&sat) / (sun_distance * range_km)).clamp(-1.0, 1.0);
    let phase_margin_deg = cos_separation.acos().to_degrees() - earth_radius_deg;

    let right_ascension = modulo(sat.y.atan2(sat.x).to_degrees(), 360.0);
    let declination = (sat.z / range_km).clamp(-1.0, 1.0).asin().to_degrees();

    ApparentSatelliteState {
        mjd,
        position: sat,
        velocity: state.velocity,
        range_km,
        right_ascension,
        declination,
        sub_point: GeoPoint::new(right_ascension - gmst(reference_mjd), declination).normalized(),
        sun_radius_deg,
        earth_radius_deg,
        phase_margin_deg,
    }
}
