use std::f64::consts::TAU;

use crate::astro::{rotate, Axis, GeoPoint, Vector3, EARTH_RADIUS_KM};
use crate::geometry::projection::{near_side_paths, Point2, ViewOrientation};
use crate::geometry::CIRCLE_SAMPLES;

/// Radio-horizon cap of a satellite at geocentric distance `range_km`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintCap {
    /// Earth-central half-angle of the cap (degrees)
    pub alpha_deg: f64,
    /// Distance of the cap plane from the geocentre along the nadir axis (km)
    pub height_km: f64,
    /// Radius of the cap circle (km)
    pub radius_km: f64,
}

impl FootprintCap {
    /// `None` at or below the surface
    pub fn new(range_km: f64) -> Option<Self> {
        if range_km.is_nan() || range_km <= EARTH_RADIUS_KM {
            return None;
        }
        let alpha = (EARTH_RADIUS_KM / range_km).acos();
        let dist = (range_km * range_km - EARTH_RADIUS_KM * EARTH_RADIUS_KM).sqrt();
        let height_km = range_km - dist * alpha.sin();
        let radius_km = (EARTH_RADIUS_KM * EARTH_RADIUS_KM - height_km * height_km)
            .max(0.0)
            .sqrt();

        Some(Self {
            alpha_deg: alpha.to_degrees(),
            height_km,
            radius_km,
        })
    }

    /// Closed circle of `samples` points (first equals last) in the globe
    /// frame, centred on the axis through `sub_point`.
    pub fn circle(&self, sub_point: GeoPoint, samples: usize) -> Vec<Vector3> {
        let denominator = samples.saturating_sub(1).max(1) as f64;
        (0..samples)
            .map(|i| {
                let (s, c) = (TAU * i as f64 / denominator).sin_cos();
                let local = Vector3::new(self.radius_km * s, self.radius_km * c, self.height_km);
                let v = rotate(Axis::X, -sub_point.latitude, local);
                rotate(Axis::Y, -sub_point.longitude, v)
            })
            .collect()
    }
}

/// Footprint of one satellite in the current view
#[derive(Debug, Clone)]
pub struct Footprint {
    pub cap: FootprintCap,
    /// Near-side pieces of the cap outline
    pub outline: Vec<Vec<Point2>>,
    /// Line from the satellite down to its nadir, pulled in to the limb
    /// when the nadir is on the far side. `None` when the satellite is
    /// hidden behind the Earth.
    pub stalk: Option<(Point2, Point2)>,
    /// Nadir marker position when the nadir faces the viewer
    pub nadir: Option<Point2>,
}

pub fn footprint(sub_point: GeoPoint, range_km: f64, view: &ViewOrientation) -> Option<Footprint> {
    let cap = FootprintCap::new(range_km)?;

    let outline = near_side_paths(
        cap.circle(sub_point, CIRCLE_SAMPLES)
            .into_iter()
            .map(|v| view.project(v)),
    );

    let nadir = view.project_geographic(sub_point, EARTH_RADIUS_KM);
    let satellite = view.project_geographic(sub_point, range_km);

    let mut foot = nadir.point();
    let r = foot.radius();
    if r > 0.0 && r < EARTH_RADIUS_KM && nadir.z < 0.0 {
        foot = Point2::new(foot.x * EARTH_RADIUS_KM / r, foot.y * EARTH_RADIUS_KM / r);
    }

    let stalk = (!satellite.is_occluded(EARTH_RADIUS_KM)).then(|| (satellite.point(), foot));

    Some(Footprint {
        cap,
        outline,
        stalk,
        nadir: nadir.is_near_side().then(|| nadir.point()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn leo_cap_size() {
        let cap = FootprintCap::new(EARTH_RADIUS_KM + 400.0).unwrap();
        assert_abs_diff_eq!(cap.alpha_deg, 19.78, epsilon = 0.02);
        assert!((19.0..23.0).contains(&cap.alpha_deg));
        // Cap plane sits at R²/range
        assert_abs_diff_eq!(
            cap.height_km,
            EARTH_RADIUS_KM * EARTH_RADIUS_KM / (EARTH_RADIUS_KM + 400.0),
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            cap.radius_km,
            EARTH_RADIUS_KM * cap.alpha_deg.to_radians().sin(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn no_cap_below_surface() {
        assert!(FootprintCap::new(EARTH_RADIUS_KM).is_none());
        assert!(FootprintCap::new(100.0).is_none());
        assert!(FootprintCap::new(f64::NAN).is_none());
    }

    #[test]
    fn circle_points_lie_on_the_cap() {
        for (range, sub) in [
            (EARTH_RADIUS_KM + 400.0, GeoPoint::new(-40.0, 51.6)),
            (EARTH_RADIUS_KM + 20_200.0, GeoPoint::new(130.0, -10.0)),
            (42_164.0, GeoPoint::new(0.0, 0.0)),
        ] {
            let cap = FootprintCap::new(range).unwrap();
            let axis = Vector3::from_geographic(sub.longitude, sub.latitude, 1.0);
            let circle = cap.circle(sub, CIRCLE_SAMPLES);
            assert_eq!(circle.len(), CIRCLE_SAMPLES);

            for p in &circle {
                let along = p.dot(&axis);
                let off_axis = p.sub(&axis.scale(along)).norm();
                assert_abs_diff_eq!(along, cap.height_km, epsilon = 1e-6);
                assert_abs_diff_eq!(off_axis, cap.radius_km, epsilon = 1e-6);
                assert_abs_diff_eq!(p.norm(), EARTH_RADIUS_KM, epsilon = 1e-6);
            }

            let first = circle[0];
            let last = circle[CIRCLE_SAMPLES - 1];
            assert_abs_diff_eq!(first.sub(&last).norm(), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn overhead_footprint_is_fully_visible() {
        let sub = GeoPoint::new(5.0, 50.0);
        let view = ViewOrientation::new(5.0, 50.0);
        let fp = footprint(sub, EARTH_RADIUS_KM + 400.0, &view).unwrap();
        assert_eq!(fp.outline.len(), 1);
        assert_eq!(fp.outline[0].len(), CIRCLE_SAMPLES);
        for p in &fp.outline[0] {
            assert_abs_diff_eq!(p.radius(), fp.cap.radius_km, epsilon = 1e-6);
        }
        let nadir = fp.nadir.unwrap();
        assert_abs_diff_eq!(nadir.radius(), 0.0, epsilon = 1e-6);
        assert!(fp.stalk.is_some());
    }

    #[test]
    fn far_side_footprint_is_hidden() {
        let view = ViewOrientation::new(0.0, 0.0);
        let fp = footprint(GeoPoint::new(180.0, 0.0), EARTH_RADIUS_KM + 400.0, &view).unwrap();
        assert!(fp.outline.is_empty());
        assert!(fp.nadir.is_none());
        assert!(fp.stalk.is_none());
    }

    #[test]
    fn limb_footprint_is_clipped() {
        let view = ViewOrientation::new(0.0, 0.0);
        let fp = footprint(GeoPoint::new(90.0, 0.0), EARTH_RADIUS_KM + 400.0, &view).unwrap();
        let drawn: usize = fp.outline.iter().map(Vec::len).sum();
        assert!(drawn > 0 && drawn < CIRCLE_SAMPLES);
        // Nadir on the limb, satellite just outside the disk
        let (sat, foot) = fp.stalk.unwrap();
        assert!(sat.radius() > EARTH_RADIUS_KM);
        assert!(foot.radius() <= EARTH_RADIUS_KM + 1e-6);
    }
}
