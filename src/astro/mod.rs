mod coords;
mod rotation;
mod sun;
mod time;

pub use coords::GeoPoint;
pub use rotation::{rotate, Axis, Vector3};
pub use sun::{sun_position, SolarEphemeris};
pub use time::{
    date_to_mjd, datetime_to_mjd, dgmst, gmst, mjd_to_date, mjd_to_datetime, modulo, nfd_to_mjd,
    now_mjd, CalendarDate, Precision, TimeError,
};

/// Equatorial Earth radius used by the propagator (km)
pub const EARTH_RADIUS_KM: f64 = 6378.135;
/// Astronomical unit (km)
pub const AU_KM: f64 = 149_597_879.691;
/// Photospheric solar radius (km)
pub const SUN_RADIUS_KM: f64 = 696.0e3;
/// Offset between Julian Date and Modified Julian Date
pub const MJD_OFFSET: f64 = 2_400_000.5;
/// MJD of the J2000.0 epoch (2000-01-01T12:00:00)
pub const J2000_MJD: f64 = 51_544.5;
