use sgp4::{Constants, Elements};

use crate::astro::{mjd_to_datetime, Vector3, MJD_OFFSET};
use crate::predict::elements::ElementSet;
use crate::predict::error::PredictError;

/// Inertial (TEME) position and velocity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    /// km
    pub position: Vector3,
    /// km/s
    pub velocity: Vector3,
}

/// Source of inertial satellite states
pub trait Propagator {
    fn norad_id(&self) -> u64;

    fn name(&self) -> &str;

    /// State at Julian Date `jd`
    fn propagate(&self, jd: f64) -> Result<StateVector, PredictError>;
}

pub struct Sgp4Propagator {
    name: String,
    norad_id: u64,
    elements: Elements,
    constants: Constants,
}

impl Sgp4Propagator {
    /// Fails when the element set is not usable by the SGP4/SDP4 model
    pub fn new(set: ElementSet) -> Result<Self, PredictError> {
        let constants =
            Constants::from_elements(&set.elements).map_err(|e| PredictError::ModelInit {
                norad_id: set.norad_id,
                message: e.to_string(),
            })?;

        Ok(Self {
            name: set.name,
            norad_id: set.norad_id,
            elements: set.elements,
            constants,
        })
    }
}

impl Propagator for Sgp4Propagator {
    fn norad_id(&self) -> u64 {
        self.norad_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn propagate(&self, jd: f64) -> Result<StateVector, PredictError> {
        let mjd = jd - MJD_OFFSET;
        let timestamp = mjd_to_datetime(mjd).ok_or(PredictError::EpochRange(mjd))?;

        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| PredictError::Propagation(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PredictError::Propagation(e.to_string()))?;

        Ok(StateVector {
            position: prediction.position.into(),
            velocity: prediction.velocity.into(),
        })
    }
}
