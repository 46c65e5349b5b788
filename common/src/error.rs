//! Error types.

use heapless::String;
use thiserror::Error;

use crate::classify::ASSET_PATH_LEN;
use crate::config::RegionId;

/// Unrecoverable problems found before the first draw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartupError {
    #[error("layout regions overlap: {a} / {b}")]
    LayoutOverlap { a: RegionId, b: RegionId },

    #[error("missing asset: {0}")]
    MissingAsset(String<ASSET_PATH_LEN>),
}

/// Why a provider fetch produced no snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("transport failure")]
    Transport,

    /// The provider answered with an error status.
    #[error("provider error (status {0})")]
    Provider(u16),

    #[error("malformed response")]
    Malformed,

    #[error("implausible values in response")]
    Implausible,
}

impl FetchError {
    /// Worth another attempt within the same cycle.
    #[inline]
    pub const fn is_transient(self) -> bool { matches!(self, Self::Timeout | Self::Transport) }

    /// The provider explicitly reported it has nothing usable; the UV line
    /// switches to N/A instead of keeping the last value.
    #[inline]
    pub const fn invalidates(self) -> bool { matches!(self, Self::Provider(_)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_classes() {
        assert!(FetchError::Timeout.is_transient());
        assert!(FetchError::Transport.is_transient());
        assert!(!FetchError::Provider(500).is_transient());
        assert!(!FetchError::Malformed.is_transient());
        assert!(FetchError::Provider(401).invalidates());
        assert!(!FetchError::Timeout.invalidates());
        assert!(!FetchError::Implausible.invalidates());
    }

    #[test]
    fn test_error_messages() {
        let err = StartupError::LayoutOverlap { a: RegionId::UvBand, b: RegionId::TemperatureGraph };
        assert_eq!(std::format!("{err}"), "layout regions overlap: uv / temp-graph");
        assert_eq!(std::format!("{}", FetchError::Provider(503)), "provider error (status 503)");
    }
}
