//! Date display for backend timestamps, against an explicit UTC offset.
//!
//! Backends store calendar-only values (an event *date*, a drag
//! anniversary) as UTC midnight. Those are shown as that calendar date in
//! every offset. Any other instant is converted into the viewer's offset.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Timelike, Utc};

/// Placeholder for missing or unparsable dates.
pub const NOT_AVAILABLE: &str = "N/A";

/// A backend timestamp after interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    /// Calendar date with no meaningful time of day.
    Date(NaiveDate),
    /// A real instant.
    Instant(DateTime<Utc>),
}

impl Moment {
    /// Parse RFC 3339 (`2025-03-08T21:30:00.000Z`) or a bare `YYYY-MM-DD`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(Moment::Date(date));
        }
        let instant = DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc);
        if is_utc_midnight(&instant) {
            Some(Moment::Date(instant.date_naive()))
        } else {
            Some(Moment::Instant(instant))
        }
    }

    /// Calendar date as seen from `offset`.
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        match self {
            Moment::Date(date) => *date,
            Moment::Instant(instant) => instant.with_timezone(&offset).date_naive(),
        }
    }

    /// Wall-clock time as seen from `offset`; `None` for date-only values.
    pub fn local_time(&self, offset: FixedOffset) -> Option<NaiveTime> {
        match self {
            Moment::Date(_) => None,
            Moment::Instant(instant) => Some(instant.with_timezone(&offset).time()),
        }
    }
}

/// `Sat, Mar 8, 2025`, or [`NOT_AVAILABLE`].
pub fn format_date(raw: &str, offset: FixedOffset) -> String {
    Moment::parse(raw)
        .map(|moment| moment.local_date(offset).format("%a, %b %-d, %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `9:30 PM`, or [`NOT_AVAILABLE`] for date-only and unparsable values.
pub fn format_time(raw: &str, offset: FixedOffset) -> String {
    Moment::parse(raw)
        .and_then(|moment| moment.local_time(offset))
        .map(|time| time.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `Sat, Mar 8, 2025 9:30 PM` or just the date for date-only values.
pub fn format_date_time(raw: &str, offset: FixedOffset) -> String {
    match Moment::parse(raw) {
        Some(moment) => {
            let date = moment.local_date(offset).format("%a, %b %-d, %Y").to_string();
            match moment.local_time(offset) {
                Some(time) => format!("{date} {}", time.format("%-I:%M %p")),
                None => date,
            }
        },
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `UTC`, `UTC+05:30`, `UTC-08:00`.
pub fn offset_label(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "UTC".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("UTC{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Offset from a browser `Date.getTimezoneOffset()` value (minutes *west* of
/// UTC). Out-of-range input falls back to UTC.
pub fn offset_from_minutes_west(minutes_west: i32) -> FixedOffset {
    minutes_west
        .checked_mul(-60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(utc)
}

/// Parse `Z`, `UTC`, `+05:30`, `-0800` or `+2`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Ok(utc());
    }
    let (sign, rest) = match raw.chars().next() {
        Some('+') => (1, &raw[1..]),
        Some('-') => (-1, &raw[1..]),
        _ => bail!("offset `{raw}` must start with + or -"),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours
        .parse()
        .with_context(|| format!("invalid hours in offset `{raw}`"))?;
    let minutes: i32 = minutes
        .parse()
        .with_context(|| format!("invalid minutes in offset `{raw}`"))?;
    if !(0..60).contains(&minutes) {
        bail!("minutes out of range in offset `{raw}`");
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .with_context(|| format!("offset `{raw}` out of range"))
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn is_utc_midnight(instant: &DateTime<Utc>) -> bool {
    instant.hour() == 0 && instant.minute() == 0 && instant.second() == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(hours: i32, minutes: i32) -> FixedOffset {
        let sign = if hours < 0 { -1 } else { 1 };
        FixedOffset::east_opt(hours * 3600 + sign * minutes * 60).expect("valid offset")
    }

    #[test]
    fn utc_midnight_keeps_calendar_date_everywhere() {
        let raw = "2025-03-08T00:00:00.000Z";
        assert_eq!(format_date(raw, offset(-8, 0)), "Sat, Mar 8, 2025");
        assert_eq!(format_date(raw, offset(0, 0)), "Sat, Mar 8, 2025");
        assert_eq!(format_date(raw, offset(14, 0)), "Sat, Mar 8, 2025");
        assert_eq!(format_time(raw, offset(-8, 0)), NOT_AVAILABLE);
    }

    #[test]
    fn instants_convert_into_offset() {
        let raw = "2025-03-09T03:30:00Z";
        assert_eq!(format_date(raw, offset(-5, 0)), "Sat, Mar 8, 2025");
        assert_eq!(format_time(raw, offset(-5, 0)), "10:30 PM");
        assert_eq!(format_date(raw, offset(5, 30)), "Sun, Mar 9, 2025");
        assert_eq!(format_time(raw, offset(5, 30)), "9:00 AM");
        assert_eq!(format_date_time(raw, offset(0, 0)), "Sun, Mar 9, 2025 3:30 AM");
    }

    #[test]
    fn bare_dates_and_garbage() {
        assert_eq!(format_date("2024-12-31", offset(-10, 0)), "Tue, Dec 31, 2024");
        assert_eq!(format_date_time("2024-12-31", offset(3, 0)), "Tue, Dec 31, 2024");
        assert_eq!(format_date("", offset(0, 0)), NOT_AVAILABLE);
        assert_eq!(format_date("next tuesday", offset(0, 0)), NOT_AVAILABLE);
    }

    #[test]
    fn offsets_with_explicit_zone_in_input() {
        // 23:00 at -02:00 is 01:00Z the next day, not a midnight
        let raw = "2025-06-30T23:00:00-02:00";
        assert_eq!(format_date(raw, offset(0, 0)), "Tue, Jul 1, 2025");
        assert_eq!(format_date(raw, offset(-2, 0)), "Mon, Jun 30, 2025");
    }

    #[test]
    fn labels() {
        assert_eq!(offset_label(offset(0, 0)), "UTC");
        assert_eq!(offset_label(offset(5, 30)), "UTC+05:30");
        assert_eq!(offset_label(offset(-8, 0)), "UTC-08:00");
    }

    #[test]
    fn browser_offsets_are_minutes_west() {
        assert_eq!(offset_from_minutes_west(480), offset(-8, 0));
        assert_eq!(offset_from_minutes_west(-330), offset(5, 30));
        assert_eq!(offset_from_minutes_west(i32::MAX), offset(0, 0));
    }

    #[test]
    fn parse_offsets() {
        assert_eq!(parse_utc_offset("Z").expect("z"), offset(0, 0));
        assert_eq!(parse_utc_offset("+05:30").expect("colon"), offset(5, 30));
        assert_eq!(parse_utc_offset("-0800").expect("compact"), offset(-8, 0));
        assert_eq!(parse_utc_offset("+2").expect("hours"), offset(2, 0));
        assert!(parse_utc_offset("05:00").is_err());
        assert!(parse_utc_offset("+05:75").is_err());
        assert!(parse_utc_offset("+30").is_err());
    }
}
