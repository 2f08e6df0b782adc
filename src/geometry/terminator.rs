//! Day/night boundary.
//!
//! The terminator is the great circle 90° from the sub-solar point; the
//! twilight lines are the parallel small circles 6°, 12° and 18° further
//! into the night. The filled night side is the part of the visible disk
//! beyond the terminator, closed along the limb.

use std::f64::consts::TAU;

use crate::astro::{gmst, modulo, rotate, sun_position, Axis, GeoPoint, Vector3, EARTH_RADIUS_KM};
use crate::geometry::projection::{near_side_paths, Point2, ViewOrientation, ViewPoint};
use crate::geometry::CIRCLE_SAMPLES;

/// Solar depression of the sunset line and the civil, nautical and
/// astronomical twilight lines (degrees)
pub const TWILIGHT_ANGLES: [f64; 4] = [0.0, -6.0, -12.0, -18.0];

/// View-frame depth below which a terminator sample counts as hidden
const LIMB_TOLERANCE_KM: f64 = 1e-6;

/// Filled night side of the visible disk
#[derive(Debug, Clone, PartialEq)]
pub enum NightSide {
    /// The visible hemisphere is entirely lit
    Empty,
    /// The visible hemisphere is entirely dark
    FullDisk,
    /// Closed, counter-clockwise boundary of the dark part
    Polygon(Vec<Point2>),
}

#[derive(Debug, Clone)]
pub struct TwilightLine {
    pub angle_deg: f64,
    pub paths: Vec<Vec<Point2>>,
}

#[derive(Debug, Clone)]
pub struct Terminator {
    pub sub_solar: GeoPoint,
    /// Projected sub-solar point
    pub sun: ViewPoint,
    /// Polar angle of the projected sub-solar point (degrees, `[0, 360)`)
    pub sun_angle_deg: f64,
    pub night: NightSide,
    pub lines: Vec<TwilightLine>,
}

/// Geographic point with the Sun in the zenith at `mjd`
pub fn sub_solar_point(mjd: f64) -> GeoPoint {
    let sun = sun_position(mjd);
    GeoPoint::new(sun.right_ascension - gmst(mjd), sun.declination).normalized()
}

/// Circle of points with solar altitude `angle_deg`, in the globe frame.
///
/// Samples are spread uniformly over `[0, 2π]` when `closed`, so the last
/// point repeats the first, or over `[0, 2π)` otherwise.
pub fn twilight_circle(
    sub_solar: GeoPoint,
    angle_deg: f64,
    samples: usize,
    closed: bool,
) -> Vec<Vector3> {
    let (sa, ca) = angle_deg.to_radians().sin_cos();
    let denominator = if closed {
        samples.saturating_sub(1).max(1)
    } else {
        samples.max(1)
    } as f64;

    (0..samples)
        .map(|i| {
            let (s, c) = (TAU * i as f64 / denominator).sin_cos();
            let local = Vector3::new(
                EARTH_RADIUS_KM * s * ca,
                EARTH_RADIUS_KM * c * ca,
                EARTH_RADIUS_KM * sa,
            );
            let v = rotate(Axis::X, -sub_solar.latitude, local);
            rotate(Axis::Y, -sub_solar.longitude, v)
        })
        .collect()
}

pub fn terminator(mjd: f64, view: &ViewOrientation) -> Terminator {
    let sub_solar = sub_solar_point(mjd);
    let sun = view.project_geographic(sub_solar, EARTH_RADIUS_KM);

    let lines = TWILIGHT_ANGLES
        .iter()
        .map(|&angle_deg| TwilightLine {
            angle_deg,
            paths: near_side_paths(
                twilight_circle(sub_solar, angle_deg, CIRCLE_SAMPLES, true)
                    .into_iter()
                    .map(|v| view.project(v)),
            ),
        })
        .collect();

    Terminator {
        sub_solar,
        sun,
        sun_angle_deg: modulo(sun.point().angle_deg(), 360.0),
        night: night_side(sub_solar, view, CIRCLE_SAMPLES),
        lines,
    }
}

/// Build the dark part of the visible disk.
///
/// The terminator is sampled cyclically and the longest run of near-side
/// samples is kept. Its two limb crossings are interpolated, and the
/// outline is closed by a limb arc running counter-clockwise from the
/// exit crossing back to the entry crossing. The night side always lies
/// to the left of the sampling direction, so this arc is the dark one.
///
/// Without a near-side sample the terminator lies on the far side (or on
/// the limb) and the whole disk is lit or dark depending on which side
/// the sub-solar point faces.
pub fn night_side(sub_solar: GeoPoint, view: &ViewOrientation, samples: usize) -> NightSide {
    let samples = samples.max(3);
    let points: Vec<ViewPoint> = twilight_circle(sub_solar, 0.0, samples, false)
        .into_iter()
        .map(|v| view.project(v))
        .collect();
    let near: Vec<bool> = points.iter().map(|p| p.z > LIMB_TOLERANCE_KM).collect();

    let Some((entry, length)) = longest_near_run(&near) else {
        let sun = view.project_geographic(sub_solar, EARTH_RADIUS_KM);
        return if sun.z > 0.0 {
            NightSide::Empty
        } else {
            NightSide::FullDisk
        };
    };

    if length == samples {
        return NightSide::Polygon(points.iter().map(ViewPoint::point).collect());
    }

    let exit = (entry + length) % samples;
    let before_entry = (entry + samples - 1) % samples;
    let last_near = (exit + samples - 1) % samples;

    let t1 = modulo(limb_crossing(&points[before_entry], &points[entry]).angle_deg(), 360.0);
    let t2 = modulo(limb_crossing(&points[last_near], &points[exit]).angle_deg(), 360.0);
    let span = modulo(t1 - t2, 360.0);

    let arc_steps = (samples - length).max(2);
    let mut polygon = Vec::with_capacity(length + arc_steps + 1);
    polygon.push(Point2::from_polar(EARTH_RADIUS_KM, t1));
    polygon.extend((0..length).map(|k| points[(entry + k) % samples].point()));
    polygon.extend(
        (0..arc_steps)
            .map(|k| Point2::from_polar(EARTH_RADIUS_KM, t2 + span * k as f64 / arc_steps as f64)),
    );

    NightSide::Polygon(polygon)
}

/// Start index and length of the longest cyclic run of `true`.
/// Ties go to the run starting first.
fn longest_near_run(near: &[bool]) -> Option<(usize, usize)> {
    let n = near.len();
    if n == 0 || !near.iter().any(|v| *v) {
        return None;
    }
    if near.iter().all(|v| *v) {
        return Some((0, n));
    }

    let mut best: Option<(usize, usize)> = None;
    for start in (0..n).filter(|&i| near[i] && !near[(i + n - 1) % n]) {
        let length = (0..n).take_while(|k| near[(start + k) % n]).count();
        if best.map_or(true, |(_, l)| length > l) {
            best = Some((start, length));
        }
    }

    best
}

/// Point where the segment from `a` to `b` crosses the limb plane `z = 0`
fn limb_crossing(a: &ViewPoint, b: &ViewPoint) -> Point2 {
    let dz = b.z - a.z;
    let f = if dz.abs() > f64::EPSILON {
        (-a.z / dz).clamp(0.0, 1.0)
    } else {
        0.5
    };
    Point2::new(a.x + (b.x - a.x) * f, a.y + (b.y - a.y) * f)
}

/// Signed area of a closed polygon (positive when counter-clockwise)
pub fn polygon_area(points: &[Point2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::J2000_MJD;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    const DISK_AREA: f64 = PI * EARTH_RADIUS_KM * EARTH_RADIUS_KM;

    fn night_fraction(sub_solar: GeoPoint, view: ViewOrientation) -> f64 {
        match night_side(sub_solar, &view, CIRCLE_SAMPLES) {
            NightSide::Empty => 0.0,
            NightSide::FullDisk => 1.0,
            NightSide::Polygon(points) => {
                for p in &points {
                    assert!(p.radius() <= EARTH_RADIUS_KM + 1e-6);
                }
                let area = polygon_area(&points);
                assert!(area > 0.0, "polygon must wind counter-clockwise");
                area / DISK_AREA
            }
        }
    }

    /// Angular distance between two geographic points (degrees)
    fn separation(a: GeoPoint, b: GeoPoint) -> f64 {
        let va = Vector3::from_geographic(a.longitude, a.latitude, 1.0);
        let vb = Vector3::from_geographic(b.longitude, b.latitude, 1.0);
        va.dot(&vb).clamp(-1.0, 1.0).acos().to_degrees()
    }

    #[test]
    fn sun_at_view_centre_leaves_no_night() {
        let view = ViewOrientation::new(20.0, 10.0);
        let sub = GeoPoint::new(20.0, 10.0);
        assert_eq!(night_side(sub, &view, CIRCLE_SAMPLES), NightSide::Empty);
    }

    #[test]
    fn sun_at_antipode_darkens_full_disk() {
        let view = ViewOrientation::new(20.0, 10.0);
        let sub = GeoPoint::new(-160.0, -10.0);
        assert_eq!(night_side(sub, &view, CIRCLE_SAMPLES), NightSide::FullDisk);
    }

    #[test]
    fn sun_on_limb_darkens_half_disk() {
        let view = ViewOrientation::new(0.0, 0.0);
        for sub in [
            GeoPoint::new(90.0, 0.0),
            GeoPoint::new(-90.0, 0.0),
            GeoPoint::new(0.0, 90.0),
            GeoPoint::new(0.0, -90.0),
        ] {
            assert_abs_diff_eq!(night_fraction(sub, view), 0.5, epsilon = 2e-3);
        }
    }

    #[test]
    fn sun_east_of_centre_darkens_west_half() {
        let view = ViewOrientation::new(0.0, 0.0);
        let NightSide::Polygon(points) = night_side(GeoPoint::new(90.0, 0.0), &view, 256) else {
            panic!("expected a polygon");
        };
        let cx = points.iter().map(|p| p.x).sum::<f64>() / points.len() as f64;
        assert!(cx < -0.3 * EARTH_RADIUS_KM, "centroid x = {cx}");
    }

    #[test]
    fn night_fraction_follows_solar_distance() {
        // Projected dark area is (1 - cos δ)/2 of the disk for a sub-solar
        // point δ away from the view centre.
        let cases = [
            (ViewOrientation::new(0.0, 0.0), GeoPoint::new(60.0, 0.0)),
            (ViewOrientation::new(0.0, 0.0), GeoPoint::new(-120.0, 0.0)),
            (ViewOrientation::new(6.4, 52.8), GeoPoint::new(-80.0, -23.4)),
            (ViewOrientation::new(-150.0, 85.0), GeoPoint::new(10.0, 23.4)),
            (ViewOrientation::new(100.0, -89.0), GeoPoint::new(100.0, -20.0)),
            (ViewOrientation::new(179.0, 0.0), GeoPoint::new(-179.0, 5.0)),
        ];
        for (view, sub) in cases {
            let delta = separation(sub, GeoPoint::new(view.longitude, view.latitude));
            let expected = (1.0 - delta.to_radians().cos()) / 2.0;
            assert_abs_diff_eq!(night_fraction(sub, view), expected, epsilon = 3e-3);
        }
    }

    #[test]
    fn night_fraction_is_monotonic_in_solar_distance() {
        let view = ViewOrientation::new(0.0, 0.0);
        let mut previous = -1.0;
        for lon in (0..=180).step_by(5) {
            let fraction = night_fraction(GeoPoint::new(lon as f64, 0.0), view);
            assert!(fraction >= previous - 1e-3, "lon {lon}: {fraction} < {previous}");
            previous = fraction;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn longest_run_handles_wrap_and_ties() {
        assert_eq!(longest_near_run(&[false, false]), None);
        assert_eq!(longest_near_run(&[]), None);
        assert_eq!(longest_near_run(&[true, true, true]), Some((0, 3)));
        assert_eq!(
            longest_near_run(&[true, true, false, false, true]),
            Some((4, 3))
        );
        assert_eq!(
            longest_near_run(&[false, true, false, true, false]),
            Some((1, 1))
        );
        assert_eq!(
            longest_near_run(&[false, true, false, true, true, false]),
            Some((3, 2))
        );
    }

    #[test]
    fn crossing_interpolates_to_the_limb() {
        let a = ViewPoint { x: 0.0, y: 0.0, z: -1.0 };
        let b = ViewPoint { x: 4.0, y: 2.0, z: 3.0 };
        assert_eq!(limb_crossing(&a, &b), Point2::new(1.0, 0.5));
    }

    #[test]
    fn terminator_lines_and_sun() {
        let sub = sub_solar_point(J2000_MJD);
        let view = ViewOrientation::new(sub.longitude, sub.latitude);
        let t = terminator(J2000_MJD, &view);
        assert_eq!(t.lines.len(), TWILIGHT_ANGLES.len());
        assert!(t.sun.is_near_side());
        assert_eq!(t.night, NightSide::Empty);
        // Looking straight down on the Sun the twilight lines are hidden
        assert!(t.lines[1..].iter().all(|l| l.paths.is_empty()));

        let view = ViewOrientation::new(sub.longitude + 180.0, -sub.latitude);
        let t = terminator(J2000_MJD, &view);
        assert_eq!(t.night, NightSide::FullDisk);
        assert!(!t.sun.is_near_side());
        // Every twilight small circle is wholly on the near side
        for line in &t.lines[1..] {
            assert_eq!(line.paths.len(), 1);
            assert_eq!(line.paths[0].len(), CIRCLE_SAMPLES);
        }
    }

    #[test]
    fn twilight_circles_keep_solar_altitude() {
        let sub = GeoPoint::new(-35.0, 12.0);
        let zenith = Vector3::from_geographic(sub.longitude, sub.latitude, 1.0);
        for angle in TWILIGHT_ANGLES {
            for p in twilight_circle(sub, angle, 64, true) {
                assert_abs_diff_eq!(p.norm(), EARTH_RADIUS_KM, epsilon = 1e-6);
                let altitude = (p.dot(&zenith) / EARTH_RADIUS_KM).asin().to_degrees();
                assert_abs_diff_eq!(altitude, angle, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn sub_solar_point_at_new_year_2000() {
        let sub = sub_solar_point(51_544.0);
        assert_abs_diff_eq!(sub.latitude, -23.07, epsilon = 0.02);
        // Around local noon at 180° longitude near midnight UTC
        assert!(sub.longitude.abs() > 175.0, "{}", sub.longitude);
    }

    #[test]
    fn polygon_area_sign() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert_abs_diff_eq!(polygon_area(&square), 1.0, epsilon = 1e-12);
        let mut reversed = square;
        reversed.reverse();
        assert_abs_diff_eq!(polygon_area(&reversed), -1.0, epsilon = 1e-12);
    }
}
