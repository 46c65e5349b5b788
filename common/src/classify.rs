//! Categorical mapping tables.
//!
//! Pure lookups from provider values to what the panel shows: condition code
//! to icon, UV index to risk band, wind bearing to compass point, lunar phase
//! index to name and asset. None of these touch the display.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{GREEN, LIGHT_GRAY, ORANGE, RED, VIOLET, YELLOW};
use crate::config::settings::MOON_PHASE_NAMES;
use crate::thresholds::{UV_HIGH_MAX, UV_LOW_MAX, UV_MODERATE_MAX, UV_VERY_HIGH_MAX};

/// Capacity of an asset path string.
pub const ASSET_PATH_LEN: usize = 40;

/// Asset path buffer.
pub type AssetPath = String<ASSET_PATH_LEN>;

// =============================================================================
// Weather Icons
// =============================================================================

/// Icon size variant. Large icons live under `/icon/`, small under `/icon50/`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IconSize {
    Large,
    Small,
}

impl IconSize {
    /// Directory prefix for this size.
    pub const fn dir(self) -> &'static str {
        match self {
            Self::Large => "/icon/",
            Self::Small => "/icon50/",
        }
    }

    /// Square pixel size an icon of this variant occupies.
    pub const fn px(self) -> u32 {
        match self {
            Self::Large => 48,
            Self::Small => 24,
        }
    }
}

/// Icon category for a weather condition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IconCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    LightRain,
    Sleet,
    Snow,
    Fog,
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Unknown,
}

impl IconCategory {
    pub const ALL: [Self; 13] = [
        Self::Thunderstorm,
        Self::Drizzle,
        Self::Rain,
        Self::LightRain,
        Self::Sleet,
        Self::Snow,
        Self::Fog,
        Self::ClearDay,
        Self::ClearNight,
        Self::PartlyCloudyDay,
        Self::PartlyCloudyNight,
        Self::Cloudy,
        Self::Unknown,
    ];

    /// File stem of the icon asset.
    pub const fn asset_name(self) -> &'static str {
        match self {
            Self::Thunderstorm => "thunderstorm",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::LightRain => "lightRain",
            Self::Sleet => "sleet",
            Self::Snow => "snow",
            Self::Fog => "fog",
            Self::ClearDay => "clear-day",
            Self::ClearNight => "clear-night",
            Self::PartlyCloudyDay => "partly-cloudy-day",
            Self::PartlyCloudyNight => "partly-cloudy-night",
            Self::Cloudy => "cloudy",
            Self::Unknown => "unknown",
        }
    }

    /// Reverse of [`asset_name`](Self::asset_name).
    pub fn from_asset_name(name: &str) -> Option<Self> { Self::ALL.iter().copied().find(|c| c.asset_name() == name) }

    /// Full asset path, e.g. `/icon50/rain.bmp`.
    pub fn asset_path(
        self,
        size: IconSize,
    ) -> AssetPath {
        let mut path = AssetPath::new();
        write!(path, "{}{}.bmp", size.dir(), self.asset_name()).ok();
        path
    }

    /// Night variant of a daytime category; other categories are unchanged.
    pub const fn to_night(self) -> Self {
        match self {
            Self::ClearDay => Self::ClearNight,
            Self::PartlyCloudyDay => Self::PartlyCloudyNight,
            other => other,
        }
    }
}

/// Map a provider condition code to an icon category.
///
/// Codes follow the OpenWeather grouping: 2xx thunder, 3xx drizzle, 5xx rain,
/// 6xx snow, 7xx atmosphere, 800 clear, 80x clouds.
pub const fn icon_for_code(code: u16) -> IconCategory {
    match code {
        200..=299 => IconCategory::Thunderstorm,
        300..=399 => IconCategory::Drizzle,
        500 => IconCategory::LightRain,
        511 => IconCategory::Sleet,
        501..=599 => IconCategory::Rain,
        611..=616 => IconCategory::Sleet,
        600..=699 => IconCategory::Snow,
        700..=799 => IconCategory::Fog,
        800 => IconCategory::ClearDay,
        801 => IconCategory::PartlyCloudyDay,
        802..=804 => IconCategory::Cloudy,
        _ => IconCategory::Unknown,
    }
}

/// Is `now` outside the daylight interval `[sunrise, sunset]`?
#[inline]
pub const fn is_night(
    now: i64,
    sunrise: i64,
    sunset: i64,
) -> bool {
    now < sunrise || now > sunset
}

/// Icon for the current slot, demoted to its night variant outside daylight.
pub const fn current_icon(
    code: u16,
    now: i64,
    sunrise: i64,
    sunset: i64,
) -> IconCategory {
    let icon = icon_for_code(code);
    if is_night(now, sunrise, sunset) { icon.to_night() } else { icon }
}

// =============================================================================
// UV Risk Band
// =============================================================================

/// UV index risk band.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UvBand {
    NotAvailable,
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvBand {
    /// Classify a UV value. Negative (or NaN) means no reading.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn from_index(uv: f32) -> Self {
        if !(uv >= 0.0) {
            Self::NotAvailable
        } else if uv <= UV_LOW_MAX {
            Self::Low
        } else if uv <= UV_MODERATE_MAX {
            Self::Moderate
        } else if uv <= UV_HIGH_MAX {
            Self::High
        } else if uv <= UV_VERY_HIGH_MAX {
            Self::VeryHigh
        } else {
            Self::Extreme
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotAvailable => "N/A",
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
            Self::VeryHigh => "VERY HIGH",
            Self::Extreme => "EXTREME",
        }
    }

    pub const fn color(self) -> Rgb565 {
        match self {
            Self::NotAvailable => LIGHT_GRAY,
            Self::Low => GREEN,
            Self::Moderate => YELLOW,
            Self::High => ORANGE,
            Self::VeryHigh => RED,
            Self::Extreme => VIOLET,
        }
    }
}

// =============================================================================
// Compass
// =============================================================================

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// 8-point compass label for a bearing in degrees. Buckets are 45 degrees
/// wide, centred on each point, and wrap so 360 is north again.
pub fn compass_label(bearing: f32) -> &'static str {
    let bucket = micromath::F32((bearing + 22.5) / 45.0).floor().0 as i32;
    COMPASS_POINTS[bucket.rem_euclid(8) as usize]
}

// =============================================================================
// Moon
// =============================================================================

/// Display name of a lunar phase index (taken mod 8).
#[inline]
pub const fn moon_phase_name(index: u8) -> &'static str { MOON_PHASE_NAMES[(index % 8) as usize] }

/// Asset path of a lunar phase image, e.g. `/moon/moonphase_L4.bmp`.
pub fn moon_asset_path(index: u8) -> AssetPath {
    let mut path = AssetPath::new();
    write!(path, "/moon/moonphase_L{}.bmp", index % 8).ok();
    path
}

/// Parse the phase index back out of a moon asset path.
pub fn moon_index_from_path(path: &str) -> Option<u8> {
    let digits = path.strip_prefix("/moon/moonphase_L")?.strip_suffix(".bmp")?;
    let index: u8 = digits.parse().ok()?;
    (index < 8).then_some(index)
}

// =============================================================================
// Unit Tests
// =============================================================================
