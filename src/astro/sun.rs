use super::{modulo, Vector3, AU_KM, MJD_OFFSET};

/// Apparent geocentric position of the Sun for one epoch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarEphemeris {
    /// Right ascension (degrees, `[0, 360)`)
    pub right_ascension: f64,
    /// Declination (degrees)
    pub declination: f64,
    /// Earth-Sun distance (km)
    pub distance_km: f64,
    /// Equatorial Cartesian position (km)
    pub position: Vector3,
}

/// Low-order solar theory: mean longitude and anomaly, equation of centre
/// to the third harmonic, and obliquity corrected for nutation in
/// longitude. Good to about an arcminute.
pub fn sun_position(mjd: f64) -> SolarEphemeris {
    let jd = mjd + MJD_OFFSET;
    let t = (jd - 2_451_545.0) / 36_525.0;

    let l0 = modulo(280.46646 + t * (36_000.76983 + t * 0.000_303_2), 360.0).to_radians();
    let m = modulo(357.52911 + t * (35_999.05029 - t * 0.000_153_7), 360.0).to_radians();
    let e = 0.016_708_634 + t * (-0.000_042_037 - t * 0.000_000_126_7);

    let c = ((1.914_602 + t * (-0.004_817 - t * 0.000_014)) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin())
    .to_radians();

    let r = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * (m + c).cos());

    // Longitude of the Moon's ascending node
    let omega = modulo(125.04 - 1934.136 * t, 360.0).to_radians();
    let lambda = l0 + c + (-0.00569 - 0.00478 * omega.sin()).to_radians();
    let obliquity = (23.439_291_11
        + (-46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t) / 3600.0
        + 0.00256 * omega.cos())
    .to_radians();

    let ra = (obliquity.cos() * lambda.sin()).atan2(lambda.cos());
    let de = (obliquity.sin() * lambda.sin()).asin();

    let distance_km = r * AU_KM;
    let position = Vector3::new(
        distance_km * de.cos() * ra.cos(),
        distance_km * de.cos() * ra.sin(),
        distance_km * de.sin(),
    );

    SolarEphemeris {
        right_ascension: modulo(ra.to_degrees(), 360.0),
        declination: de.to_degrees(),
        distance_km,
        position,
    }
}
