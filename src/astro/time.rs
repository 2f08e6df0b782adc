use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use super::{J2000_MJD, MJD_OFFSET};

/// MJD of the Unix epoch
const UNIX_EPOCH_MJD: f64 = 40_587.0;
/// First Julian Day number of the Gregorian calendar (1582-10-15)
const GREGORIAN_JDN: f64 = 2_299_161.0;

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("invalid timestamp '{input}': {source}")]
    Parse {
        input: String,
        source: chrono::ParseError,
    },
}

/// `x mod y` in `[0, y)` for positive `y`
pub fn modulo(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r < 0.0 {
        // -1e-17 % 360 + 360 rounds to 360
        let wrapped = r + y;
        if wrapped >= y {
            0.0
        } else {
            wrapped
        }
    } else {
        r
    }
}

/// Calendar date to MJD. Dates before 1582-10-15 use the Julian calendar.
///
/// `day` carries the time of day as a fraction.
pub fn date_to_mjd(year: i32, month: u32, day: f64) -> f64 {
    let (mut year, mut month) = (year as f64, month as f64);
    let gregorian = !(year < 1582.0
        || (year == 1582.0 && month < 10.0)
        || (year == 1582.0 && month == 10.0 && day < 15.0));

    if month < 3.0 {
        year -= 1.0;
        month += 12.0;
    }

    let b = if gregorian {
        let a = (year / 100.0).floor();
        2.0 - a + (a / 4.0).floor()
    } else {
        0.0
    };

    let jd = (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b
        - 1524.5;

    jd - MJD_OFFSET
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Seconds,
    Milliseconds,
}

impl Precision {
    fn ticks_per_day(self) -> i64 {
        match self {
            Precision::Seconds => 86_400,
            Precision::Milliseconds => 86_400_000,
        }
    }
}

/// Broken-down UTC calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
    pub precision: Precision,
}

impl CalendarDate {
    /// Day of month with the time of day as a fraction, as taken by
    /// [`date_to_mjd`].
    pub fn day_fraction(&self) -> f64 {
        self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + (self.second as f64 + self.millisecond as f64 / 1000.0) / 86_400.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.precision == Precision::Milliseconds {
            write!(f, ".{:03}", self.millisecond)?;
        }
        Ok(())
    }
}

/// MJD to calendar date, rounded to the requested precision.
pub fn mjd_to_date(mjd: f64, precision: Precision) -> CalendarDate {
    let ticks_per_day = precision.ticks_per_day();
    let jd = mjd + MJD_OFFSET + 0.5;

    let mut z = jd.floor();
    let mut ticks = ((jd - z) * ticks_per_day as f64).round() as i64;
    if ticks >= ticks_per_day {
        ticks -= ticks_per_day;
        z += 1.0;
    }

    let a = if z < GREGORIAN_JDN {
        z
    } else {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;

    let ticks_per_second = ticks_per_day / 86_400;
    let seconds = ticks / ticks_per_second;

    CalendarDate {
        year,
        month,
        day,
        hour: (seconds / 3600) as u32,
        minute: (seconds / 60 % 60) as u32,
        second: (seconds % 60) as u32,
        millisecond: (ticks % ticks_per_second * 1000 / ticks_per_second) as u32,
        precision,
    }
}

/// Parse a `YYYY-MM-DDTHH:MM:SS[.sss]` timestamp (UTC) into MJD
pub fn nfd_to_mjd(nfd: &str) -> Result<f64, TimeError> {
    let parsed = NaiveDateTime::parse_from_str(nfd.trim(), "%Y-%m-%dT%H:%M:%S%.f").map_err(
        |source| TimeError::Parse {
            input: nfd.to_string(),
            source,
        },
    )?;
    Ok(datetime_to_mjd(&parsed.and_utc()))
}

pub fn datetime_to_mjd(timestamp: &DateTime<Utc>) -> f64 {
    UNIX_EPOCH_MJD + timestamp.timestamp_millis() as f64 / 86_400_000.0
}

/// Returns `None` outside chrono's representable range
pub fn mjd_to_datetime(mjd: f64) -> Option<DateTime<Utc>> {
    let millis = ((mjd - UNIX_EPOCH_MJD) * 86_400_000.0).round();
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

pub fn now_mjd() -> f64 {
    datetime_to_mjd(&Utc::now())
}

/// Greenwich Mean Sidereal Time (degrees, `[0, 360)`)
pub fn gmst(mjd: f64) -> f64 {
    let d = mjd - J2000_MJD;
    let t = d / 36_525.0;
    modulo(
        280.460_618_37 + 360.985_647_366_29 * d + t * t * (0.000_387_933 - t / 38_710_000.0),
        360.0,
    )
}

/// Rate of change of GMST (degrees per day)
pub fn dgmst(mjd: f64) -> f64 {
    let t = (mjd - J2000_MJD) / 36_525.0;
    360.985_647_366_29 + t * (0.000_387_933 - t / 38_710_000.0)
}
