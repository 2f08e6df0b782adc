use serde::Serialize;

/// Earth-centred Cartesian vector (km)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn sub(&self, other: &Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(&self, factor: f64) -> Vector3 {
        Vector3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Point on a sphere of `radius` in the globe frame: +z through
    /// (0°, 0°), +x through longitude 90°, +y through the north pole.
    pub fn from_geographic(longitude_deg: f64, latitude_deg: f64, radius: f64) -> Vector3 {
        let (sl, cl) = longitude_deg.to_radians().sin_cos();
        let (sb, cb) = latitude_deg.to_radians().sin_cos();
        Vector3::new(sl * cb * radius, sb * radius, cl * cb * radius)
    }

    /// Inverse of [`Vector3::from_geographic`], returns (longitude, latitude)
    /// in degrees with longitude in (-180, 180].
    pub fn to_geographic(&self) -> (f64, f64) {
        let r = self.norm();
        if r == 0.0 {
            return (0.0, 0.0);
        }
        let longitude = self.x.atan2(self.z).to_degrees();
        let latitude = (self.y / r).clamp(-1.0, 1.0).asin().to_degrees();
        (longitude, latitude)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Vector3::new(v[0], v[1], v[2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_index(index: usize) -> Option<Axis> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Right-handed rotation of `v` about a coordinate axis by `angle_deg`.
///
/// Chained calls compose in call order, so
/// `rotate(Axis::X, b, rotate(Axis::Y, l, v))` applies the Y spin first.
pub fn rotate(axis: Axis, angle_deg: f64, v: Vector3) -> Vector3 {
    let (sa, ca) = angle_deg.to_radians().sin_cos();
    match axis {
        Axis::X => Vector3::new(v.x, v.y * ca - v.z * sa, v.z * ca + v.y * sa),
        Axis::Y => Vector3::new(v.x * ca - v.z * sa, v.y, v.z * ca + v.x * sa),
        Axis::Z => Vector3::new(v.x * ca - v.y * sa, v.y * ca + v.x * sa, v.z),
    }
}
