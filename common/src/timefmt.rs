//! Small date/time helpers shared by the widgets.

use core::fmt::Write;

use heapless::String;
use time::{OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::config::settings::SHORT_DOW;

/// `hh:mm` or `h:mmam` style label.
pub type TimeLabel = String<8>;

/// UTC date-time for unix seconds; out-of-range values clamp to the epoch.
pub fn datetime_from_unix(secs: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(secs).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Strip the offset after converting to local time.
pub fn to_local(
    utc: OffsetDateTime,
    offset: UtcOffset,
) -> PrimitiveDateTime {
    let local = utc.to_offset(offset);
    PrimitiveDateTime::new(local.date(), local.time())
}

/// Format a time of day as `13:05` (24 h) or `1:05pm` (12 h).
pub fn format_hm(
    t: Time,
    use_24h: bool,
) -> TimeLabel {
    let mut out = TimeLabel::new();
    if use_24h {
        write!(out, "{:02}:{:02}", t.hour(), t.minute()).ok();
    } else {
        let (h, suffix) = match t.hour() {
            0 => (12, "am"),
            h @ 1..=11 => (h, "am"),
            12 => (12, "pm"),
            h => (h - 12, "pm"),
        };
        write!(out, "{}:{:02}{}", h, t.minute(), suffix).ok();
    }
    out
}

/// Short upper-case weekday name (`MON`).
#[inline]
pub fn short_weekday(date: time::Date) -> &'static str { SHORT_DOW[date.weekday().number_from_sunday() as usize] }

/// Minutes since local midnight, used to detect a displayed-minute change.
#[inline]
pub fn minute_of_day(t: Time) -> u16 { u16::from(t.hour()) * 60 + u16::from(t.minute()) }

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;

    #[test]
    fn test_format_24h() {
        assert_eq!(format_hm(Time::from_hms(13, 5, 0).unwrap(), true).as_str(), "13:05");
        assert_eq!(format_hm(Time::from_hms(0, 0, 0).unwrap(), true).as_str(), "00:00");
    }

    #[test]
    fn test_format_12h() {
        assert_eq!(format_hm(Time::from_hms(13, 5, 0).unwrap(), false).as_str(), "1:05pm");
        assert_eq!(format_hm(Time::from_hms(0, 30, 0).unwrap(), false).as_str(), "12:30am");
        assert_eq!(format_hm(Time::from_hms(12, 0, 0).unwrap(), false).as_str(), "12:00pm");
    }

    #[test]
    fn test_short_weekday() {
        // 2024-06-01 was a Saturday
        let d = time::Date::from_calendar_date(2024, Month::June, 1).unwrap();
        assert_eq!(short_weekday(d), "SAT");
        assert_eq!(short_weekday(d.next_day().unwrap()), "SUN");
    }

    #[test]
    fn test_to_local() {
        let utc = datetime_from_unix(1_717_200_000); // 2024-06-01 00:00 UTC
        let local = to_local(utc, UtcOffset::from_hms(12, 0, 0).unwrap());
        assert_eq!(local.hour(), 12);
        assert_eq!(local.day(), 1);
    }

    #[test]
    fn test_unix_out_of_range_clamps() {
        assert_eq!(datetime_from_unix(i64::MAX), OffsetDateTime::UNIX_EPOCH);
    }
}
