use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::astro::{gmst, GeoPoint, EARTH_RADIUS_KM};
use crate::geometry::ViewOrientation;
use crate::map::command::{Command, Step};

pub const DEFAULT_LENGTH_S: i64 = 60;
/// Half-width of the plot window in Earth radii
pub const DEFAULT_ZOOM: f64 = 1.2;
const ZOOM_FACTOR: f64 = 1.2;
const PAN_STEP_DEG: f64 = 10.0;

/// How the view centre follows the Earth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    /// Fixed over the observer
    #[default]
    Terrestrial,
    /// Fixed against the stars since the reference epoch
    Sidereal,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Terrestrial => Orientation::Sidereal,
            Orientation::Sidereal => Orientation::Terrestrial,
        }
    }
}

/// Everything a frame needs, resolved for one redraw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewContext {
    pub epoch_mjd: f64,
    pub view: ViewOrientation,
    /// Half-width of the plot window (km)
    pub half_width_km: f64,
    pub length_s: i64,
}

/// Controller state carried between redraws
#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    pub observer: GeoPoint,
    pub observer_name: String,
    pub orientation: Orientation,
    /// Frame epoch (MJD); `None` follows the clock
    pub epoch: Option<f64>,
    /// Epoch whose sidereal time anchors the sidereal orientation
    pub reference_mjd: Option<f64>,
    pub length_s: i64,
    pub zoom: f64,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            observer: GeoPoint::default(),
            observer_name: "Unknown".to_string(),
            orientation: Orientation::default(),
            epoch: None,
            reference_mjd: None,
            length_s: DEFAULT_LENGTH_S,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapState {
    /// Fix a clock-following epoch at `now`, and the sidereal reference
    /// at the frame epoch if it is still unset.
    pub fn pin(&mut self, now: f64) {
        let epoch = *self.epoch.get_or_insert(now);
        self.reference_mjd.get_or_insert(epoch);
    }

    pub fn context(&self, now: f64) -> ViewContext {
        let epoch_mjd = self.epoch.unwrap_or(now);

        ViewContext {
            epoch_mjd,
            view: ViewOrientation::new(self.view_longitude(epoch_mjd), self.observer.latitude),
            half_width_km: self.zoom * EARTH_RADIUS_KM,
            length_s: self.length_s,
        }
    }

    /// Sidereal drift of the view longitude since the reference epoch
    fn sidereal_offset(&self, epoch_mjd: f64) -> f64 {
        match self.orientation {
            Orientation::Terrestrial => 0.0,
            Orientation::Sidereal => {
                gmst(epoch_mjd) - gmst(self.reference_mjd.unwrap_or(epoch_mjd))
            }
        }
    }

    fn view_longitude(&self, epoch_mjd: f64) -> f64 {
        self.observer.longitude - self.sidereal_offset(epoch_mjd)
    }

    /// State after `command`, or `None` when the map should close.
    pub fn apply(&self, command: &Command, now: f64) -> Option<MapState> {
        let mut next = self.clone();

        match *command {
            Command::Redraw => {
                next.epoch = None;
                next.reference_mjd = None;
                next.length_s = DEFAULT_LENGTH_S;
            }
            Command::ToggleOrientation => next.orientation = self.orientation.toggled(),
            Command::Recenter(cursor) => {
                let ctx = self.context(now);
                match ctx.view.locate(cursor, EARTH_RADIUS_KM) {
                    Some(point) => {
                        next.observer = GeoPoint::new(
                            point.longitude + self.sidereal_offset(ctx.epoch_mjd),
                            point.latitude,
                        );
                    }
                    None => log::debug!("Recenter outside the disk ignored"),
                }
            }
            Command::ZoomIn => next.zoom /= ZOOM_FACTOR,
            Command::ZoomOut => next.zoom *= ZOOM_FACTOR,
            Command::PanLatitude(step) => next.observer.latitude += step.sign() * PAN_STEP_DEG,
            Command::PanLongitude(step) => next.observer.longitude += step.sign() * PAN_STEP_DEG,
            Command::ScaleLength(Step::Up) => next.length_s = self.length_s.saturating_mul(2),
            Command::ScaleLength(Step::Down) => next.length_s = (self.length_s / 2).max(1),
            Command::StepTime(step) => {
                next.pin(now);
                if let Some(epoch) = next.epoch.as_mut() {
                    *epoch += step.sign() * self.length_s as f64 / 86_400.0;
                }
            }
            Command::SetIntegrationLength(seconds) => next.length_s = seconds,
            Command::Quit => return None,
        }

        Some(next)
    }
}
