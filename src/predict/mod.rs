mod apparent;
mod elements;
mod error;
mod propagator;
mod track;

pub use apparent::{apparent_state, ApparentSatelliteState, Illumination};
pub use elements::{ElementSet, TleReader};
pub use error::PredictError;
pub use propagator::{Propagator, Sgp4Propagator, StateVector};
pub use track::{
    build_track, build_tracks, orbital_period_estimate, track_timestep, GroundTrack, TRACK_STEPS,
};

#[cfg(test)]
pub(crate) use track::tests::CircularOrbit;
