use crate::astro::{GeoPoint, EARTH_RADIUS_KM};
use crate::geometry::projection::{near_side_paths, Point2, ViewOrientation};

/// Spacing of meridians and parallels (degrees)
pub const GRID_SPACING_DEG: i32 = 30;

/// Near-side pieces of the meridians and parallels, sampled every degree.
pub fn graticule(view: &ViewOrientation) -> Vec<Vec<Point2>> {
    let spacing = GRID_SPACING_DEG as usize;
    let mut paths = Vec::new();

    for lon in (-180..180).step_by(spacing) {
        paths.extend(near_side_paths((-90..=90).map(|lat| {
            view.project_geographic(GeoPoint::new(lon as f64, lat as f64), EARTH_RADIUS_KM)
        })));
    }

    for lat in (-90 + GRID_SPACING_DEG..90).step_by(spacing) {
        paths.extend(near_side_paths((-180..=180).map(|lon| {
            view.project_geographic(GeoPoint::new(lon as f64, lat as f64), EARTH_RADIUS_KM)
        })));
    }

    paths
}
