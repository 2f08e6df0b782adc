mod footprint;
mod grid;
mod projection;
mod terminator;

pub use footprint::{footprint, Footprint, FootprintCap};
pub use grid::{graticule, GRID_SPACING_DEG};
pub use projection::{inertial_to_globe, near_side_paths, Point2, ViewOrientation, ViewPoint};
pub use terminator::{
    night_side, polygon_area, sub_solar_point, terminator, twilight_circle, NightSide, Terminator,
    TwilightLine, TWILIGHT_ANGLES,
};

/// Samples per drawn circle (footprints, twilight lines, limb)
pub const CIRCLE_SAMPLES: usize = 1024;
