//! Centralized threshold and tolerance configuration.
//!
//! All thresholds are compile-time constants with ordering assertions, so a
//! misconfigured band (e.g. `UV_HIGH_MAX < UV_MODERATE_MAX`) fails the build
//! instead of producing a wrong color on the panel.

// =============================================================================
// UV Index Bands
// =============================================================================
// Each bound is the inclusive upper edge of its band: 2.0 is LOW, 2.01 is
// MODERATE. Anything below 0 means the provider had no reading.

/// Upper bound of the LOW band (green).
pub const UV_LOW_MAX: f32 = 2.0;

/// Upper bound of the MODERATE band (yellow).
pub const UV_MODERATE_MAX: f32 = 5.0;

/// Upper bound of the HIGH band (orange).
pub const UV_HIGH_MAX: f32 = 7.0;

/// Upper bound of the VERY HIGH band (red). Above this is EXTREME (violet).
pub const UV_VERY_HIGH_MAX: f32 = 10.0;

const _: () = assert!(0.0 < UV_LOW_MAX);
const _: () = assert!(UV_LOW_MAX < UV_MODERATE_MAX);
const _: () = assert!(UV_MODERATE_MAX < UV_HIGH_MAX);
const _: () = assert!(UV_HIGH_MAX < UV_VERY_HIGH_MAX);

// =============================================================================
// Change Detection Tolerances
// =============================================================================
// Absolute-difference thresholds. Two readings closer than these are treated
// as equal so numeric noise below display precision never causes a redraw.

/// Temperatures (current, forecast min/max, hourly series), in display units.
pub const TEMP_TOLERANCE: f32 = 0.5;

/// Precipitation probabilities, as fractions in `0.0..=1.0`.
pub const PROBABILITY_TOLERANCE: f32 = 0.01;

/// UV index values.
pub const UV_TOLERANCE: f32 = 0.1;

/// Wind speed, in display units.
pub const WIND_SPEED_TOLERANCE: f32 = 0.1;

/// Wind bearing, in degrees.
pub const WIND_BEARING_TOLERANCE: f32 = 1.0;

const _: () = assert!(PROBABILITY_TOLERANCE < UV_TOLERANCE);
const _: () = assert!(UV_TOLERANCE < TEMP_TOLERANCE);

// =============================================================================
// Plausibility
// =============================================================================

/// Lowest current temperature accepted from the provider, in Celsius.
pub const TEMP_PLAUSIBLE_MIN_C: f32 = -60.0;

/// Highest current temperature accepted from the provider, in Celsius.
pub const TEMP_PLAUSIBLE_MAX_C: f32 = 60.0;

const _: () = assert!(TEMP_PLAUSIBLE_MIN_C < TEMP_PLAUSIBLE_MAX_C);

/// Convert a Celsius bound to Fahrenheit for imperial units.
#[inline]
pub const fn celsius_to_fahrenheit(c: f32) -> f32 { c * 9.0 / 5.0 + 32.0 }

/// Tolerance comparison used by every change-detection rule.
///
/// NaN on either side counts as a difference, including NaN against NaN.
/// A region holding a NaN value therefore redraws on every fetch.
#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn differs(
    a: f32,
    b: f32,
    tolerance: f32,
) -> bool {
    !(micromath::F32(a - b).abs().0 <= tolerance)
}

// =============================================================================
// Unit Tests
// =============================================================================
