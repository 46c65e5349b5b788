//! Lunar phase from a calendar date.
//!
//! The default routine for clocks that do not compute the phase themselves.
//! Mean synodic month from a reference new moon; good to within a few hours,
//! which is plenty for an eighth-of-a-cycle bucket.

use time::Date;

/// Julian date of the new moon of 2000-01-06 18:14 UTC.
const REFERENCE_NEW_MOON_JD: f64 = 2_451_550.1;

/// Mean length of a lunation in days.
const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Number of phase buckets.
pub const MOON_PHASES: u8 = 8;

#[inline]
fn floor_f64(x: f64) -> f64 {
    let t = x as i64 as f64;
    if t > x { t - 1.0 } else { t }
}

/// Julian date at `hour` UTC on `date`.
pub fn julian_date(
    date: Date,
    hour: u8,
) -> f64 {
    // to_julian_day() is the day number at noon
    f64::from(date.to_julian_day()) - 0.5 + f64::from(hour) / 24.0
}

/// Phase index 0..8 for `date` at `hour`, both UTC: 0 new, 2 first
/// quarter, 4 full, 6 last quarter, odd indices the crescents and gibbous
/// phases between.
pub fn moon_phase_index(
    date: Date,
    hour: u8,
) -> u8 {
    let age = (julian_date(date, hour) - REFERENCE_NEW_MOON_JD) / SYNODIC_MONTH_DAYS;
    let fraction = age - floor_f64(age);
    let bucket = floor_f64(fraction * f64::from(MOON_PHASES) + 0.5) as i64;
    bucket.rem_euclid(i64::from(MOON_PHASES)) as u8
}
