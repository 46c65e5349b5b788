//! Host wall clock with a fixed UTC offset.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use weather_common::Clock;
use weather_common::timefmt::to_local;

/// Christchurch standard time, matching the default coordinates.
pub const DEFAULT_OFFSET_HOURS: i8 = 12;

pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub const fn new(offset: UtcOffset) -> Self { Self { offset } }

    #[inline]
    pub const fn offset(&self) -> UtcOffset { self.offset }
}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime { OffsetDateTime::now_utc() }

    fn to_local(
        &self,
        utc: OffsetDateTime,
    ) -> PrimitiveDateTime {
        to_local(utc, self.offset)
    }
}

/// Offset from the `WEATHER_UTC_OFFSET` environment variable (whole hours),
/// falling back to [`DEFAULT_OFFSET_HOURS`].
pub fn offset_from_env() -> UtcOffset {
    let hours = std::env::var("WEATHER_UTC_OFFSET")
        .ok()
        .and_then(|v| v.trim().parse::<i8>().ok())
        .unwrap_or(DEFAULT_OFFSET_HOURS);
    UtcOffset::from_hms(hours, 0, 0).unwrap_or_else(|err| {
        log::warn!("invalid UTC offset {hours}: {err}, using UTC");
        UtcOffset::UTC
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_local_applies_offset() {
        let clock = SystemClock::new(UtcOffset::from_hms(12, 0, 0).unwrap());
        let utc = OffsetDateTime::from_unix_timestamp(0).unwrap();
        let local = clock.to_local(utc);
        assert_eq!(local.hour(), 12);
        assert_eq!(local.date(), utc.date());
    }
}
