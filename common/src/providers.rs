//! Collaborator interfaces: data providers, clock and asset storage.
//!
//! Transport, JSON parsing, timezone rules and flash storage live behind
//! these traits. The shared crate only sees finished values.

use heapless::String;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::astro;
use crate::config::settings::{API_KEY_LEN, COORD_LEN};
use crate::config::{Settings, Units};
use crate::error::FetchError;
use crate::snapshot::{ConditionsSnapshot, UvReading};

// =============================================================================
// Providers
// =============================================================================

/// Parameters for one provider call.
#[derive(Clone, Copy, Debug)]
pub struct FetchRequest<'a> {
    pub api_key: &'a String<API_KEY_LEN>,
    pub latitude: &'a String<COORD_LEN>,
    pub longitude: &'a String<COORD_LEN>,
    pub units: Units,
    pub language: &'a str,
    /// Per-attempt timeout the transport must honour.
    pub timeout_ms: u32,
}

impl<'a> FetchRequest<'a> {
    /// Request for the primary provider.
    pub fn forecast(settings: &'a Settings) -> Self { Self::with_key(settings, &settings.forecast_api_key) }

    /// Request for the UV provider.
    pub fn uv(settings: &'a Settings) -> Self { Self::with_key(settings, &settings.uv_api_key) }

    fn with_key(
        settings: &'a Settings,
        api_key: &'a String<API_KEY_LEN>,
    ) -> Self {
        Self {
            api_key,
            latitude: &settings.latitude,
            longitude: &settings.longitude,
            units: settings.units,
            language: settings.language.as_str(),
            timeout_ms: settings.timeout_ms,
        }
    }
}

/// Source of current conditions and the multi-day forecast.
pub trait ForecastProvider {
    /// One attempt. Returns a complete snapshot or an error, never a partial one.
    fn fetch_forecast(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<ConditionsSnapshot, FetchError>;
}

/// Source of the UV index.
pub trait UvProvider {
    fn fetch_uv(
        &mut self,
        request: &FetchRequest<'_>,
    ) -> Result<UvReading, FetchError>;
}

// =============================================================================
// Clock
// =============================================================================

/// Wall clock with timezone rules.
pub trait Clock {
    fn now_utc(&self) -> OffsetDateTime;

    /// Local wall time for a UTC instant.
    fn to_local(
        &self,
        utc: OffsetDateTime,
    ) -> PrimitiveDateTime;

    fn now_local(&self) -> PrimitiveDateTime { self.to_local(self.now_utc()) }

    /// Lunar phase index 0..8 for a UTC date and hour.
    fn lunar_phase_index(
        &self,
        date: Date,
        hour: u8,
    ) -> u8 {
        astro::moon_phase_index(date, hour)
    }
}

// =============================================================================
// Assets
// =============================================================================

/// Read-only store of fonts and images.
pub trait AssetStore {
    fn contains(
        &self,
        path: &str,
    ) -> bool;
}
