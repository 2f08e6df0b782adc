use std::f64::consts::PI;

use crate::astro::MJD_OFFSET;
use crate::predict::apparent::{apparent_state, ApparentSatelliteState};
use crate::predict::elements::ElementSet;
use crate::predict::error::PredictError;
use crate::predict::propagator::{Propagator, Sgp4Propagator};

/// Samples per track after the initial one
pub const TRACK_STEPS: usize = 500;
/// Fraction of an orbit covered per `TRACK_STEPS` steps is 1/0.75
const TRACK_SPAN_FACTOR: f64 = 0.75;

#[derive(Debug, Clone)]
pub struct GroundTrack {
    pub norad_id: u64,
    pub name: String,
    pub samples: Vec<ApparentSatelliteState>,
}

/// Circular-orbit period estimate `2πr/v` (seconds)
pub fn orbital_period_estimate(range_km: f64, speed_km_s: f64) -> f64 {
    2.0 * PI * range_km / speed_km_s
}

/// Step between track samples (seconds) so that `steps` steps span
/// 4/3 of the estimated period.
pub fn track_timestep(range_km: f64, speed_km_s: f64, steps: usize) -> f64 {
    orbital_period_estimate(range_km, speed_km_s) / (TRACK_SPAN_FACTOR * steps as f64)
}

/// Sample `steps + 1` apparent states starting at `mjd`.
///
/// The step is re-estimated from each sample's own radius and speed.
pub fn build_track(
    propagator: &dyn Propagator,
    mjd: f64,
    steps: usize,
) -> Result<GroundTrack, PredictError> {
    let mut samples = Vec::with_capacity(steps + 1);
    let mut jd = mjd + MJD_OFFSET;

    for _ in 0..=steps {
        let state = propagator.propagate(jd)?;
        let sample = apparent_state(&state, jd - MJD_OFFSET, mjd);

        let dt = track_timestep(sample.range_km, sample.speed_km_s(), steps);
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PredictError::Propagation(format!(
                "degenerate state for NORAD {} at JD {jd}",
                propagator.norad_id()
            )));
        }
        jd += dt / 86_400.0;
        samples.push(sample);
    }

    Ok(GroundTrack {
        norad_id: propagator.norad_id(),
        name: propagator.name().to_string(),
        samples,
    })
}

/// Build a track for every element set, skipping the ones that fail.
pub fn build_tracks<I>(sets: I, mjd: f64, steps: usize) -> Vec<GroundTrack>
where
    I: IntoIterator<Item = Result<ElementSet, PredictError>>,
{
    let mut tracks = Vec::new();

    for set in sets {
        let track = set
            .and_then(Sgp4Propagator::new)
            .and_then(|propagator| build_track(&propagator, mjd, steps));

        match track {
            Ok(track) => tracks.push(track),
            Err(e) => log::warn!("Skipping satellite: {}", e),
        }
    }

    log::debug!("Built {} ground tracks", tracks.len());
    tracks
}
