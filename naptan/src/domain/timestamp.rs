//! Timestamp parsing for NaPTAN lifecycle fields.
//!
//! The API emits `CreationDateTime` and `ModificationDateTime` as loosely
//! ISO 8601 strings: fractional seconds of any length and an optional
//! numeric UTC offset, with or without colons. Some rows carry values that
//! have the right shape but name impossible dates (month 17, hour 99).
//! Both malformed and impossible values parse to `None`.

use std::sync::LazyLock;

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Timelike,
};
use serde_json::Value;

/// A validated, timezone-aware point in time at microsecond resolution.
pub type Timestamp = DateTime<FixedOffset>;

/// Shape of a dataset timestamp.
///
/// Groups: year, month, day, hour, minute, second, up to six fractional
/// digits (further digits are matched and dropped), offset sign, offset
/// hours, offset minutes, offset seconds.
static TIMESTAMP_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]{1,6})[0-9]*)?(?:([+-])([0-9]{2})(?::?([0-9]{2})(?::?([0-9]{2}))?)?)?$",
    )
    // SAFETY: the pattern is a literal and known to compile
    .unwrap()
});

/// Raw numeric components pulled out of a timestamp string.
///
/// Nothing here has been checked against the calendar yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimestampParts {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    micro: u32,
    offset_secs: i32,
}

impl TimestampParts {
    /// Match the string against the timestamp shape.
    fn match_shape(text: &str) -> Option<Self> {
        let caps = TIMESTAMP_RE.captures(text)?;
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        // Fractional digits are taken as a plain integer, so ".123" is 123us.
        let micro = caps
            .get(7)
            .map_or(Some(0), |m| m.as_str().parse::<u32>().ok())?;

        let offset_secs = match caps.get(8) {
            Some(sign) => {
                let hours = num(9)? as i32;
                let minutes = caps.get(10).map_or(Some(0), |_| num(10))? as i32;
                let seconds = caps.get(11).map_or(Some(0), |_| num(11))? as i32;
                let magnitude = hours * 3600 + minutes * 60 + seconds;
                if sign.as_str() == "-" {
                    -magnitude
                } else {
                    magnitude
                }
            }
            None => 0,
        };

        Some(Self {
            year: num(1)? as i32,
            month: num(2)?,
            day: num(3)?,
            hour: num(4)?,
            minute: num(5)?,
            second: num(6)?,
            micro,
            offset_secs,
        })
    }

    /// Build a calendar instant, rejecting anything out of range.
    fn to_timestamp(self) -> Option<Timestamp> {
        // Year zero has no place in the Gregorian calendar the dataset uses.
        if self.year < 1 {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day)?;
        let time = NaiveTime::from_hms_micro_opt(self.hour, self.minute, self.second, self.micro)?;
        let offset = FixedOffset::east_opt(self.offset_secs)?;
        offset
            .from_local_datetime(&NaiveDateTime::new(date, time))
            .single()
    }
}

/// Parse a dataset timestamp string.
///
/// Returns `None` for empty input, for anything outside the supported
/// format, and for well-formed strings whose components do not make a real
/// date and time. Input without an offset is taken as UTC.
///
/// # Examples
///
/// ```
/// use naptan::domain::parse_timestamp;
/// use chrono::{Datelike, Timelike};
///
/// let ts = parse_timestamp("2022-03-21T15:30:45.123456+01:00").unwrap();
/// assert_eq!(ts.month(), 3);
/// assert_eq!(ts.nanosecond(), 123_456_000);
/// assert_eq!(ts.offset().local_minus_utc(), 3600);
///
/// // Right shape, impossible month
/// assert!(parse_timestamp("0001-17-99T15:30:45").is_none());
/// assert!(parse_timestamp("").is_none());
/// ```
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    if text.is_empty() {
        return None;
    }
    TimestampParts::match_shape(text)?.to_timestamp()
}

/// Parse a timestamp from a loosely typed JSON value.
///
/// Only strings can hold a timestamp; numbers, booleans, null, arrays and
/// objects all give `None`.
pub fn parse_timestamp_value(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => parse_timestamp(s),
        _ => None,
    }
}

/// Format a timestamp the way it is written back out in rows and maps.
///
/// RFC 3339, with microseconds only when they are nonzero.
///
/// The fraction is always six digits, since [`parse_timestamp`] reads it
/// as a count of microseconds.
pub fn format_timestamp(ts: &Timestamp) -> String {
    let seconds = if ts.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    ts.to_rfc3339_opts(seconds, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn expected(
        (y, mo, d): (i32, u32, u32),
        (h, mi, s, us): (u32, u32, u32, u32),
        offset_secs: i32,
    ) -> Timestamp {
        FixedOffset::east_opt(offset_secs)
            .unwrap()
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(y, mo, d)
                    .unwrap()
                    .and_hms_micro_opt(h, mi, s, us)
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn rejects_invalid_or_empty_strings() {
        for input in ["", "abcd", "123"] {
            assert_eq!(parse_timestamp(input), None, "input {input:?}");
        }
    }

    #[test]
    fn rejects_non_string_values() {
        assert_eq!(parse_timestamp_value(&json!(123)), None);
        assert_eq!(parse_timestamp_value(&json!(0.156)), None);
        assert_eq!(parse_timestamp_value(&json!(null)), None);
        assert_eq!(parse_timestamp_value(&json!(true)), None);
        assert_eq!(parse_timestamp_value(&json!(["2022-03-21T15:30:45"])), None);
    }

    #[test]
    fn string_values_parse() {
        assert_eq!(
            parse_timestamp_value(&json!("2022-03-21T15:30:45")),
            Some(expected((2022, 3, 21), (15, 30, 45, 0), 0))
        );
    }

    #[test]
    fn rejects_valid_shape_but_impossible_date() {
        for input in [
            "0001-17-99T15:30:45",
            "2022-12-01T99:30:45",
            "2000-17-06T23:30:45",
            "1995-10-99T15:30:75",
            "2022-10-01T15:86:45",
        ] {
            assert_eq!(parse_timestamp(input), None, "input {input:?}");
        }
    }

    #[test]
    fn rejects_day_out_of_range_for_month() {
        assert_eq!(parse_timestamp("2022-02-29T00:00:00"), None);
        assert_eq!(parse_timestamp("2022-04-31T00:00:00"), None);
        assert!(parse_timestamp("2024-02-29T00:00:00").is_some());
    }

    #[test]
    fn rejects_year_zero_and_leap_second() {
        assert_eq!(parse_timestamp("0000-01-01T00:00:00"), None);
        assert_eq!(parse_timestamp("2016-12-31T23:59:60"), None);
    }

    #[test]
    fn parses_valid_dates() {
        let cases = [
            ("2022-03-21T15:30:45", expected((2022, 3, 21), (15, 30, 45, 0), 0)),
            ("2022-03-21T15:30:45.123", expected((2022, 3, 21), (15, 30, 45, 123), 0)),
            (
                "2022-03-21T15:30:45.123456",
                expected((2022, 3, 21), (15, 30, 45, 123456), 0),
            ),
            (
                "2022-03-21T15:30:45.123456789",
                expected((2022, 3, 21), (15, 30, 45, 123456), 0),
            ),
            ("2022-03-21T15:30:45+01:00", expected((2022, 3, 21), (15, 30, 45, 0), 3600)),
            ("2022-03-21T15:30:45-01:00", expected((2022, 3, 21), (15, 30, 45, 0), -3600)),
            ("2022-03-21T15:30:45+01:30", expected((2022, 3, 21), (15, 30, 45, 0), 5400)),
            (
                "2022-03-21T15:30:45.123456+01:00",
                expected((2022, 3, 21), (15, 30, 45, 123456), 3600),
            ),
            (
                "2022-03-21T15:30:45.123456+0100",
                expected((2022, 3, 21), (15, 30, 45, 123456), 3600),
            ),
        ];

        for (input, want) in cases {
            let got = parse_timestamp(input);
            assert_eq!(got, Some(want), "input {input:?}");
            // Offsets must match too, not just the instant
            assert_eq!(
                got.unwrap().offset().local_minus_utc(),
                want.offset().local_minus_utc()
            );
        }
    }

    #[test]
    fn fraction_is_truncated_not_rounded() {
        let ts = parse_timestamp("2022-03-21T15:30:45.9999999").unwrap();
        assert_eq!(ts.nanosecond(), 999_999_000);
        assert_eq!(ts.second(), 45);
    }

    #[test]
    fn offset_hours_only_and_with_seconds() {
        let ts = parse_timestamp("2022-03-21T15:30:45+02").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 7200);

        let ts = parse_timestamp("2022-03-21T15:30:45-01:00:30").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), -3630);
    }

    #[test]
    fn rejects_unsupported_suffixes() {
        assert_eq!(parse_timestamp("2022-03-21T15:30:45Z"), None);
        assert_eq!(parse_timestamp("2022-03-21T15:30:45 "), None);
        assert_eq!(parse_timestamp("2022-03-21 15:30:45"), None);
        assert_eq!(parse_timestamp("2022-03-21T15:30:45."), None);
    }

    #[test]
    fn rejects_dangling_offset_separator() {
        assert_eq!(parse_timestamp("2022-03-21T15:30:45+01:"), None);
        assert_eq!(parse_timestamp("2022-03-21T15:30:45+01:00:"), None);
        assert_eq!(parse_timestamp("2022-03-21T15:30:45+0100:"), None);
        assert!(parse_timestamp("2022-03-21T15:30:45+010030").is_some());
    }

    #[test]
    fn whole_millisecond_fractions_survive_formatting() {
        for input in [
            "2022-10-05T09:13:44.120000+01:00",
            "2022-10-05T09:13:44.500000-02:30",
        ] {
            let ts = parse_timestamp(input).unwrap();
            assert_eq!(format_timestamp(&ts), input);
            assert_eq!(parse_timestamp(&format_timestamp(&ts)), Some(ts));
        }
    }

    #[test]
    fn rejects_offset_of_a_day_or_more() {
        assert_eq!(parse_timestamp("2022-03-21T15:30:45+24:00"), None);
        assert!(parse_timestamp("2022-03-21T15:30:45+23:59").is_some());
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digits are Unicode decimal digits but not dataset digits
        assert_eq!(parse_timestamp("٢٠٢٢-03-21T15:30:45"), None);
    }

    #[test]
    fn format_roundtrips_through_parse() {
        let ts = parse_timestamp("2022-03-21T15:30:45.000120+01:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2022-03-21T15:30:45.000120+01:00");
        assert_eq!(parse_timestamp(&format_timestamp(&ts)), Some(ts));

        let ts = parse_timestamp("2022-03-21T15:30:45").unwrap();
        assert_eq!(format_timestamp(&ts), "2022-03-21T15:30:45+00:00");
        assert_eq!(ts.year(), 2022);
    }
}
