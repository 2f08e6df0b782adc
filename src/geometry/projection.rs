use serde::Serialize;

use crate::astro::{rotate, Axis, GeoPoint, Vector3};

/// Plot-plane coordinate (km)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle (degrees, `(-180, 180]`)
    pub fn angle_deg(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn from_polar(radius: f64, angle_deg: f64) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        Self::new(radius * c, radius * s)
    }
}

/// A point in the view frame. `z > 0` faces the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ViewPoint {
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    pub fn is_near_side(&self) -> bool {
        self.z > 0.0
    }

    /// Behind a sphere of `radius` centred on the origin
    pub fn is_occluded(&self, radius: f64) -> bool {
        self.point().radius() < radius && self.z < 0.0
    }
}

impl From<Vector3> for ViewPoint {
    fn from(v: Vector3) -> Self {
        ViewPoint {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Centre of the orthographic view (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ViewOrientation {
    pub longitude: f64,
    pub latitude: f64,
}

impl ViewOrientation {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Globe frame to view frame: spin by the centre longitude about the
    /// polar axis, then tilt by the centre latitude.
    pub fn project(&self, v: Vector3) -> ViewPoint {
        rotate(Axis::X, self.latitude, rotate(Axis::Y, self.longitude, v)).into()
    }

    /// View frame back to the globe frame
    pub fn unproject(&self, v: Vector3) -> Vector3 {
        rotate(Axis::Y, -self.longitude, rotate(Axis::X, -self.latitude, v))
    }

    pub fn project_geographic(&self, point: GeoPoint, radius: f64) -> ViewPoint {
        self.project(Vector3::from_geographic(point.longitude, point.latitude, radius))
    }

    /// Geographic point under plot coordinate `p` on the near side of a
    /// sphere of `radius`, or `None` outside the disk.
    pub fn locate(&self, p: Point2, radius: f64) -> Option<GeoPoint> {
        let r2 = radius * radius - p.x * p.x - p.y * p.y;
        if r2 < 0.0 {
            return None;
        }
        let (longitude, latitude) = self
            .unproject(Vector3::new(p.x, p.y, r2.sqrt()))
            .to_geographic();
        Some(GeoPoint::new(longitude, latitude))
    }
}

/// Equatorial inertial vector to the globe frame at sidereal angle
/// `sidereal_deg`: the pole maps to +y and right ascension becomes
/// longitude east of Greenwich.
pub fn inertial_to_globe(v: Vector3, sidereal_deg: f64) -> Vector3 {
    let v = rotate(Axis::X, -90.0, v);
    let v = rotate(Axis::Y, 90.0, v);
    rotate(Axis::Y, sidereal_deg, v)
}

/// Split a sampled curve into near-side runs; each run becomes one
/// pen-down path and every far-side point lifts the pen.
pub fn near_side_paths<I>(points: I) -> Vec<Vec<Point2>>
where
    I: IntoIterator<Item = ViewPoint>,
{
    let mut paths = Vec::new();
    let mut current: Vec<Point2> = Vec::new();

    for p in points {
        if p.is_near_side() {
            current.push(p.point());
        } else if !current.is_empty() {
            paths.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        paths.push(current);
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::EARTH_RADIUS_KM;
    use approx::assert_abs_diff_eq;

    #[test]
    fn view_centre_projects_to_origin() {
        for (lon, lat) in [(0.0, 0.0), (45.0, 30.0), (-120.0, -60.0), (170.0, 89.0)] {
            let view = ViewOrientation::new(lon, lat);
            let p = view.project_geographic(GeoPoint::new(lon, lat), EARTH_RADIUS_KM);
            assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(p.z, EARTH_RADIUS_KM, epsilon = 1e-6);
        }
    }

    #[test]
    fn east_is_right_and_north_is_up() {
        let view = ViewOrientation::new(10.0, 0.0);
        let east = view.project_geographic(GeoPoint::new(20.0, 0.0), 1.0);
        let north = view.project_geographic(GeoPoint::new(10.0, 10.0), 1.0);
        assert!(east.x > 0.0 && east.y.abs() < 1e-12);
        assert!(north.y > 0.0 && north.x.abs() < 1e-12);
        let antipode = view.project_geographic(GeoPoint::new(-170.0, 0.0), 1.0);
        assert!(!antipode.is_near_side());
    }

    #[test]
    fn unproject_inverts_project() {
        let view = ViewOrientation::new(-33.0, 52.0);
        let v = Vector3::new(100.0, -2000.0, 5000.0);
        let p = view.project(v);
        let back = view.unproject(Vector3::new(p.x, p.y, p.z));
        assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-9);
        assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-9);
    }

    #[test]
    fn locate_finds_clicked_point() {
        let view = ViewOrientation::new(6.4, 52.8);
        let target = GeoPoint::new(20.0, 40.0);
        let p = view.project_geographic(target, EARTH_RADIUS_KM);
        let found = view.locate(p.point(), EARTH_RADIUS_KM).unwrap();
        assert_abs_diff_eq!(found.longitude, 20.0, epsilon = 1e-6);
        assert_abs_diff_eq!(found.latitude, 40.0, epsilon = 1e-6);
        assert!(view
            .locate(Point2::new(EARTH_RADIUS_KM, EARTH_RADIUS_KM), EARTH_RADIUS_KM)
            .is_none());
    }

    #[test]
    fn inertial_axes_map_to_globe() {
        // Pole to +y
        let pole = inertial_to_globe(Vector3::new(0.0, 0.0, 1.0), 0.0);
        assert_abs_diff_eq!(pole.y, 1.0, epsilon = 1e-12);
        // Right ascension 90° is longitude 90° at zero sidereal time
        let (lon, lat) = inertial_to_globe(Vector3::new(0.0, 1.0, 0.0), 0.0).to_geographic();
        assert_abs_diff_eq!(lon, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-9);
        // and longitude 60° when 30° of sidereal time has elapsed
        let (lon, _) = inertial_to_globe(Vector3::new(0.0, 1.0, 0.0), 30.0).to_geographic();
        assert_abs_diff_eq!(lon, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn far_side_points_lift_the_pen() {
        let zs = [1.0, 1.0, -1.0, 1.0, 0.0, 1.0, 1.0, 1.0];
        let points = zs.iter().enumerate().map(|(i, z)| ViewPoint {
            x: i as f64,
            y: 0.0,
            z: *z,
        });
        let paths = near_side_paths(points);
        let lengths: Vec<_> = paths.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![2, 1, 3]);
        assert_eq!(paths[2][0], Point2::new(5.0, 0.0));
    }

    #[test]
    fn occlusion_needs_disk_and_far_side() {
        let r = EARTH_RADIUS_KM;
        assert!(ViewPoint { x: 0.0, y: 0.0, z: -1.0 }.is_occluded(r));
        assert!(!ViewPoint { x: 0.0, y: 0.0, z: 1.0 }.is_occluded(r));
        assert!(!ViewPoint { x: 2.0 * r, y: 0.0, z: -1.0 }.is_occluded(r));
    }

    #[test]
    fn polar_helpers() {
        let p = Point2::from_polar(2.0, 90.0);
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.angle_deg(), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.radius(), 2.0, epsilon = 1e-12);
    }
}
