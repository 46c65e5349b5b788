//! Run-time settings and UI strings.

use heapless::String;

use super::timing::{HTTP_RETRIES, HTTP_TIMEOUT_MS, PRIMARY_INTERVAL_MS, UV_INTERVAL_MS};
use crate::thresholds::{TEMP_PLAUSIBLE_MAX_C, TEMP_PLAUSIBLE_MIN_C, celsius_to_fahrenheit};

// =============================================================================
// Defaults
// =============================================================================

/// Default latitude (Christchurch, NZ).
pub const DEFAULT_LATITUDE: &str = "-43.5321";

/// Default longitude.
pub const DEFAULT_LONGITUDE: &str = "172.6362";

/// Default provider language code.
pub const DEFAULT_LANGUAGE: &str = "en";

/// 24 hour clock by default.
pub const DEFAULT_USE_24H: bool = true;

/// Max length of an API key.
pub const API_KEY_LEN: usize = 40;

/// Max length of a latitude/longitude string.
pub const COORD_LEN: usize = 12;

// =============================================================================
// UI Strings
// =============================================================================

/// Short weekday names indexed by `Weekday::number_from_sunday()`; slot 0 is
/// the "unknown day" placeholder.
pub const SHORT_DOW: [&str; 8] = ["???", "SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

pub const SUN_LABEL: &str = "Sun";
pub const CLOUD_LABEL: &str = "Cloud";
pub const HUMIDITY_LABEL: &str = "Humidity";

/// Display names for lunar phase indices 0..8.
pub const MOON_PHASE_NAMES: [&str; 8] = ["New", "Waxing", "1st qtr", "Waxing", "Full", "Waning", "Last qtr", "Waning"];

// =============================================================================
// Units
// =============================================================================

/// Measurement system requested from the provider.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Query-string value understood by the provider.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub const fn temp_suffix(self) -> &'static str {
        match self {
            Self::Metric => "C",
            Self::Imperial => "F",
        }
    }

    pub const fn speed_suffix(self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }

    /// Plausible current-temperature range in these units.
    pub const fn plausible_range(self) -> (f32, f32) {
        match self {
            Self::Metric => (TEMP_PLAUSIBLE_MIN_C, TEMP_PLAUSIBLE_MAX_C),
            Self::Imperial => (
                celsius_to_fahrenheit(TEMP_PLAUSIBLE_MIN_C),
                celsius_to_fahrenheit(TEMP_PLAUSIBLE_MAX_C),
            ),
        }
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Everything the controller needs to know about the station, collected once
/// at startup.
#[derive(Clone, Debug)]
pub struct Settings {
    pub forecast_api_key: String<API_KEY_LEN>,
    pub uv_api_key: String<API_KEY_LEN>,
    pub latitude: String<COORD_LEN>,
    pub longitude: String<COORD_LEN>,
    pub units: Units,
    pub language: String<4>,
    pub use_24h: bool,
    pub primary_interval_ms: u64,
    pub uv_interval_ms: u64,
    pub timeout_ms: u32,
    pub retries: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            forecast_api_key: String::new(),
            uv_api_key: String::new(),
            latitude: truncated(DEFAULT_LATITUDE),
            longitude: truncated(DEFAULT_LONGITUDE),
            units: Units::Metric,
            language: truncated(DEFAULT_LANGUAGE),
            use_24h: DEFAULT_USE_24H,
            primary_interval_ms: PRIMARY_INTERVAL_MS,
            uv_interval_ms: UV_INTERVAL_MS,
            timeout_ms: HTTP_TIMEOUT_MS,
            retries: HTTP_RETRIES,
        }
    }
}

/// Copy as much of `s` as fits into a fixed-capacity string.
pub fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
